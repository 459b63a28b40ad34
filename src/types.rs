use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    K,
    I,
    F,
    S,
    Cr0,
    Cd0,
}

impl ParamKey {
    pub const ALL: [ParamKey; 6] = [
        ParamKey::K,
        ParamKey::I,
        ParamKey::F,
        ParamKey::S,
        ParamKey::Cr0,
        ParamKey::Cd0,
    ];

    /// Wire name, as used in the request body and the form labels.
    pub fn name(self) -> &'static str {
        match self {
            ParamKey::K => "K",
            ParamKey::I => "I",
            ParamKey::F => "F",
            ParamKey::S => "S",
            ParamKey::Cr0 => "CR0",
            ParamKey::Cd0 => "CD0",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ParamKey::K => "base attack",
            ParamKey::I => "attack % from investment",
            ParamKey::F => "flat attack",
            ParamKey::S => "points to allocate",
            ParamKey::Cr0 => "initial crit rate %",
            ParamKey::Cd0 => "initial crit damage %",
        }
    }

    fn index(self) -> usize {
        match self {
            ParamKey::K => 0,
            ParamKey::I => 1,
            ParamKey::F => 2,
            ParamKey::S => 3,
            ParamKey::Cr0 => 4,
            ParamKey::Cd0 => 5,
        }
    }
}

/// Raw text per parameter, exactly as typed.
#[derive(Clone, Debug, PartialEq)]
pub struct InputParameters {
    raw: [String; 6],
}

impl InputParameters {
    pub fn get(&self, key: ParamKey) -> &str {
        &self.raw[key.index()]
    }

    pub fn set(&mut self, key: ParamKey, raw: impl Into<String>) {
        self.raw[key.index()] = raw.into();
    }
}

impl Default for InputParameters {
    fn default() -> Self {
        Self {
            raw: [
                "1000".to_owned(),
                "10".to_owned(),
                "500".to_owned(),
                "50".to_owned(),
                "5".to_owned(),
                "50".to_owned(),
            ],
        }
    }
}

/// Coerced request body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CalculationPayload {
    #[serde(rename = "K")]
    pub k: f64,
    #[serde(rename = "I")]
    pub i: f64,
    #[serde(rename = "F")]
    pub f: f64,
    #[serde(rename = "S")]
    pub s: f64,
    #[serde(rename = "CR0")]
    pub cr0: f64,
    #[serde(rename = "CD0")]
    pub cd0: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CalculationResult {
    pub optimal_x: f64,
    pub optimal_y: f64,
    pub optimal_z: f64,
    pub max_damage: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct HeatmapSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub damage: f64,
}

/// Successful response body. Unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CalculationResponse {
    #[serde(flatten)]
    pub result: CalculationResult,
    #[serde(default, alias = "heatmap_data")]
    pub heatmap: Option<Vec<HeatmapSample>>,
}

pub struct Preset {
    pub name: &'static str,
    pub values: [(ParamKey, &'static str); 6],
}

pub const PRESETS: [Preset; 3] = [
    Preset {
        name: "Defaults",
        values: [
            (ParamKey::K, "1000"),
            (ParamKey::I, "10"),
            (ParamKey::F, "500"),
            (ParamKey::S, "50"),
            (ParamKey::Cr0, "5"),
            (ParamKey::Cd0, "50"),
        ],
    },
    Preset {
        name: "Invested attack, 40 points",
        values: [
            (ParamKey::K, "1000"),
            (ParamKey::I, "60"),
            (ParamKey::F, "100"),
            (ParamKey::S, "40"),
            (ParamKey::Cr0, "5"),
            (ParamKey::Cd0, "50"),
        ],
    },
    Preset {
        name: "High base crit",
        values: [
            (ParamKey::K, "1000"),
            (ParamKey::I, "300"),
            (ParamKey::F, "100"),
            (ParamKey::S, "100"),
            (ParamKey::Cr0, "50"),
            (ParamKey::Cd0, "100"),
        ],
    },
];

/// Message shown in place of a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorState {
    pub message: String,
}
