use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use crate::types::HeatmapSample;

/// One plotted point. `x`/`y` are the axes, `damage` drives the color and
/// `z` only shows up on hover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatPoint {
    pub x: f64,
    pub y: f64,
    pub damage: f64,
    pub z: f64,
}

impl From<&HeatmapSample> for HeatPoint {
    fn from(sample: &HeatmapSample) -> Self {
        Self {
            x: sample.x,
            y: sample.y,
            damage: sample.damage,
            z: sample.z,
        }
    }
}

/// Largest number of columns or rows the raster may have.
pub const MAX_GRID_SIDE: usize = 512;

/// One raster axis: a cell per distinct value while those fit in
/// `MAX_GRID_SIDE`, otherwise equal-width bins over the value range.
#[derive(Clone, Debug)]
enum Axis {
    Distinct(Vec<f64>),
    Binned { min: f64, max: f64, bins: usize },
}

impl Axis {
    fn new(values: impl Iterator<Item = f64>) -> Self {
        let distinct = distinct_sorted(values);
        if distinct.len() <= MAX_GRID_SIDE {
            return Axis::Distinct(distinct);
        }
        Axis::Binned {
            min: distinct[0],
            max: distinct[distinct.len() - 1],
            bins: MAX_GRID_SIDE,
        }
    }

    fn len(&self) -> usize {
        match self {
            Axis::Distinct(values) => values.len(),
            Axis::Binned { bins, .. } => *bins,
        }
    }

    fn range(&self) -> (f64, f64) {
        match self {
            Axis::Distinct(values) => (values[0], values[values.len() - 1]),
            Axis::Binned { min, max, .. } => (*min, *max),
        }
    }

    fn index_of(&self, value: f64) -> Option<usize> {
        match self {
            Axis::Distinct(values) => values.binary_search_by(|v| v.total_cmp(&value)).ok(),
            Axis::Binned { min, max, bins } => {
                let t = (value - min) / (max - min);
                Some(((t * *bins as f64) as usize).min(bins - 1))
            }
        }
    }
}

/// Samples laid onto a grid of x (columns) and y (rows, largest on top),
/// at most `MAX_GRID_SIDE` cells per side.
#[derive(Clone, Debug)]
pub struct Heatmap {
    points: Vec<HeatPoint>,
    columns: Axis,
    rows: Axis,
    cells: Vec<Option<usize>>,
    damage_min: f64,
    damage_max: f64,
}

impl Heatmap {
    /// `None` for an empty sequence: there is nothing to render.
    pub fn from_samples(samples: &[HeatmapSample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let points: Vec<HeatPoint> = samples.iter().map(HeatPoint::from).collect();
        let columns = Axis::new(points.iter().map(|p| p.x));
        let rows = Axis::new(points.iter().map(|p| p.y));

        let mut damage_min = f64::INFINITY;
        let mut damage_max = f64::NEG_INFINITY;
        let mut cells = vec![None; columns.len() * rows.len()];

        for (idx, point) in points.iter().enumerate() {
            damage_min = damage_min.min(point.damage);
            damage_max = damage_max.max(point.damage);

            let (Some(col), Some(row_from_bottom)) =
                (columns.index_of(point.x), rows.index_of(point.y))
            else {
                continue;
            };
            let row = rows.len() - 1 - row_from_bottom;
            cells[row * columns.len() + col] = Some(idx);
        }

        Some(Self {
            points,
            columns,
            rows,
            cells,
            damage_min,
            damage_max,
        })
    }

    pub fn points(&self) -> &[HeatPoint] {
        &self.points
    }

    pub fn dimensions(&self) -> [usize; 2] {
        [self.columns.len(), self.rows.len()]
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.columns.range()
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.rows.range()
    }

    pub fn damage_range(&self) -> (f64, f64) {
        (self.damage_min, self.damage_max)
    }

    /// Row 0 is the top of the image.
    pub fn point_at(&self, col: usize, row: usize) -> Option<&HeatPoint> {
        if col >= self.columns.len() || row >= self.rows.len() {
            return None;
        }
        self.cells[row * self.columns.len() + col].map(|idx| &self.points[idx])
    }

    /// Looks up the point under a position given as fractions of the image
    /// width and height.
    pub fn point_at_fraction(&self, u: f32, v: f32) -> Option<&HeatPoint> {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        let col = (u * self.columns.len() as f32) as usize;
        let row = (v * self.rows.len() as f32) as usize;
        self.point_at(col, row)
    }

    pub fn to_rgba8(&self) -> Vec<u8> {
        let span = (self.damage_max - self.damage_min).max(1.0e-9);
        let mut rgba = Vec::with_capacity(self.cells.len() * 4);

        for cell in &self.cells {
            match cell {
                Some(idx) => {
                    let t = ((self.points[*idx].damage - self.damage_min) / span) as f32;
                    let [r, g, b] = spectral_color(t);
                    rgba.extend_from_slice(&[
                        (r * 255.0) as u8,
                        (g * 255.0) as u8,
                        (b * 255.0) as u8,
                        255,
                    ]);
                }
                None => rgba.extend_from_slice(&[0, 0, 0, 0]),
            }
        }

        rgba
    }
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a.total_cmp(b).is_eq());
    values
}

fn spectral_color(t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    let anchors = [
        (0.00, [0.02, 0.03, 0.13]),
        (0.25, [0.00, 0.46, 0.95]),
        (0.50, [0.05, 0.92, 0.35]),
        (0.75, [0.98, 0.86, 0.10]),
        (1.00, [0.95, 0.12, 0.18]),
    ];

    for pair in anchors.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t >= t0 && t <= t1 {
            let alpha = (t - t0) / (t1 - t0);
            return [
                c0[0] + (c1[0] - c0[0]) * alpha,
                c0[1] + (c1[1] - c0[1]) * alpha,
                c0[2] + (c1[2] - c0[2]) * alpha,
            ];
        }
    }

    anchors[anchors.len() - 1].1
}

/// Cached texture for the current heatmap. Rebuilt only when the samples
/// change.
#[derive(Default)]
pub struct HeatmapView {
    heatmap: Option<Heatmap>,
    texture: Option<TextureHandle>,
}

impl HeatmapView {
    pub fn set_samples(&mut self, samples: &[HeatmapSample]) {
        self.heatmap = Heatmap::from_samples(samples);
        self.texture = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(heatmap) = &self.heatmap else {
            return;
        };

        let texture = self.texture.get_or_insert_with(|| {
            let image =
                ColorImage::from_rgba_unmultiplied(heatmap.dimensions(), &heatmap.to_rgba8());
            ui.ctx()
                .load_texture("damage-heatmap", image, TextureOptions::NEAREST)
        });

        let (x_min, x_max) = heatmap.x_range();
        let (y_min, y_max) = heatmap.y_range();
        let (d_min, d_max) = heatmap.damage_range();
        ui.heading("Damage heatmap");
        ui.horizontal(|ui| {
            ui.label(format!("x: {x_min} to {x_max} (left to right)"));
            ui.separator();
            ui.label(format!("y: {y_min} to {y_max} (bottom to top)"));
            ui.separator();
            ui.label(format!("damage: {d_min:.2} to {d_max:.2}"));
            ui.separator();
            ui.label(format!("{} samples", heatmap.points().len()));
        });

        let image_size = texture.size_vec2();
        let available = ui.available_size();
        let scale = (available.x / image_size.x).min(available.y / image_size.y);
        let response = ui.add(
            egui::Image::new((texture.id(), image_size * scale)).sense(egui::Sense::hover()),
        );

        if let Some(pos) = response.hover_pos() {
            let rect = response.rect;
            let u = (pos.x - rect.min.x) / rect.width();
            let v = (pos.y - rect.min.y) / rect.height();
            if let Some(point) = heatmap.point_at_fraction(u, v).copied() {
                response.on_hover_ui_at_pointer(|ui| {
                    ui.label(format!("x = {}", point.x));
                    ui.label(format!("y = {}", point.y));
                    ui.label(format!("z = {}", point.z));
                    ui.strong(format!("damage = {:.2}", point.damage));
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(s: u32) -> Vec<HeatmapSample> {
        let mut samples = Vec::new();
        for x in 0..=s {
            for y in 0..=(s - x) {
                let z = s - x - y;
                samples.push(HeatmapSample {
                    x: x as f64,
                    y: y as f64,
                    z: z as f64,
                    damage: (10 * x + 3 * y + z) as f64,
                });
            }
        }
        samples
    }

    #[test]
    fn empty_dataset_renders_nothing() {
        assert!(Heatmap::from_samples(&[]).is_none());

        let mut view = HeatmapView::default();
        view.set_samples(&[]);
        assert!(view.heatmap.is_none());
    }

    #[test]
    fn series_has_one_point_per_sample() {
        let samples = triangle(4);
        let heatmap = Heatmap::from_samples(&samples).unwrap();
        assert_eq!(heatmap.points().len(), samples.len());

        for (point, sample) in heatmap.points().iter().zip(&samples) {
            assert_eq!(point.x, sample.x);
            assert_eq!(point.y, sample.y);
            assert_eq!(point.damage, sample.damage);
            assert_eq!(point.z, sample.z);
        }
    }

    #[test]
    fn order_of_samples_does_not_change_the_grid() {
        let samples = triangle(3);
        let mut reversed = samples.clone();
        reversed.reverse();

        let a = Heatmap::from_samples(&samples).unwrap();
        let b = Heatmap::from_samples(&reversed).unwrap();
        assert_eq!(a.dimensions(), b.dimensions());
        assert_eq!(a.to_rgba8(), b.to_rgba8());
    }

    #[test]
    fn grid_puts_largest_y_on_top() {
        let heatmap = Heatmap::from_samples(&triangle(2)).unwrap();
        assert_eq!(heatmap.dimensions(), [3, 3]);
        assert_eq!(heatmap.x_range(), (0.0, 2.0));
        assert_eq!(heatmap.y_range(), (0.0, 2.0));

        let top_left = heatmap.point_at(0, 0).unwrap();
        assert_eq!((top_left.x, top_left.y, top_left.z), (0.0, 2.0, 0.0));

        assert!(heatmap.point_at(2, 0).is_none());

        let bottom_right = heatmap.point_at(2, 2).unwrap();
        assert_eq!((bottom_right.x, bottom_right.y), (2.0, 0.0));
        assert!(heatmap.point_at(3, 0).is_none());
    }

    #[test]
    fn hover_lookup_uses_image_fractions() {
        let heatmap = Heatmap::from_samples(&triangle(2)).unwrap();
        let point = heatmap.point_at_fraction(0.9, 0.9).unwrap();
        assert_eq!((point.x, point.y), (2.0, 0.0));
        assert!(heatmap.point_at_fraction(0.9, 0.1).is_none());
        assert!(heatmap.point_at_fraction(1.0, 0.5).is_none());
        assert!(heatmap.point_at_fraction(-0.1, 0.5).is_none());
    }

    #[test]
    fn rgba_colors_occupied_cells_and_clears_the_rest() {
        let heatmap = Heatmap::from_samples(&triangle(2)).unwrap();
        let rgba = heatmap.to_rgba8();
        assert_eq!(rgba.len(), 3 * 3 * 4);

        let alpha = |col: usize, row: usize| rgba[(row * 3 + col) * 4 + 3];
        assert_eq!(alpha(0, 0), 255);
        assert_eq!(alpha(2, 0), 0);
        assert_eq!(alpha(1, 1), 255);

        assert_eq!(heatmap.damage_range(), (2.0, 20.0));
        let max_cell = (2 * 3 + 2) * 4;
        assert!(rgba[max_cell] > rgba[max_cell + 2], "highest damage should be warm");
    }

    #[test]
    fn spread_out_samples_are_binned_into_a_bounded_grid() {
        let samples: Vec<HeatmapSample> = (0..9000)
            .map(|i| HeatmapSample {
                x: i as f64 * 0.5,
                y: i as f64 * 0.25,
                z: 0.0,
                damage: i as f64,
            })
            .collect();
        let heatmap = Heatmap::from_samples(&samples).unwrap();

        assert_eq!(heatmap.points().len(), 9000);
        let [width, height] = heatmap.dimensions();
        assert!(width <= MAX_GRID_SIDE && height <= MAX_GRID_SIDE);
        assert_eq!(heatmap.to_rgba8().len(), width * height * 4);
        assert_eq!(heatmap.x_range(), (0.0, 4499.5));
        assert_eq!(heatmap.y_range(), (0.0, 2249.75));

        let bin_width = 4499.5 / width as f64;
        let first = heatmap.point_at(0, height - 1).unwrap();
        assert!(first.x < bin_width, "{first:?}");
        let last = heatmap.point_at(width - 1, 0).unwrap();
        assert_eq!(last.damage, 8999.0);
    }

    #[test]
    fn duplicate_cells_show_the_later_sample() {
        let samples = [
            HeatmapSample {
                x: 1.0,
                y: 1.0,
                z: 0.0,
                damage: 5.0,
            },
            HeatmapSample {
                x: 1.0,
                y: 1.0,
                z: 7.0,
                damage: 9.0,
            },
        ];
        let heatmap = Heatmap::from_samples(&samples).unwrap();
        assert_eq!(heatmap.points().len(), 2);
        assert_eq!(heatmap.dimensions(), [1, 1]);
        assert_eq!(heatmap.point_at(0, 0).map(|p| p.z), Some(7.0));
    }
}
