use tracing::info;

use crate::inputs::InputCollector;
use crate::submission::{build_payload, Outcome};
use crate::types::{CalculationPayload, CalculationResult, ErrorState, HeatmapSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

/// What the result area shows. A result and an error never coexist.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultArea {
    #[default]
    Empty,
    Result {
        result: CalculationResult,
        heatmap: Vec<HeatmapSample>,
    },
    Error(ErrorState),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// Single owner of the view's mutable state. Every mutation goes through
/// `inputs_mut`, `begin_submission` or `complete`.
///
/// Overlapping submissions are not ordered: whichever completion is applied
/// last is what the view shows.
#[derive(Debug, Default)]
pub struct ViewState {
    inputs: InputCollector,
    area: ResultArea,
    in_flight: usize,
    next_ticket: u64,
}

impl ViewState {
    pub fn inputs(&self) -> &InputCollector {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InputCollector {
        &mut self.inputs
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight > 0 {
            Phase::Submitting
        } else {
            Phase::Idle
        }
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        match &self.area {
            ResultArea::Result { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn heatmap(&self) -> &[HeatmapSample] {
        match &self.area {
            ResultArea::Result { heatmap, .. } => heatmap,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ErrorState> {
        match &self.area {
            ResultArea::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Clears the previous outcome and coerces the current inputs.
    pub fn begin_submission(&mut self) -> (Ticket, CalculationPayload) {
        self.area = ResultArea::Empty;
        self.in_flight += 1;
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        (ticket, build_payload(self.inputs.params()))
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.area = match outcome {
            Outcome::Success(response) => {
                info!(
                    ticket = ticket.0,
                    max_damage = response.result.max_damage,
                    samples = response.heatmap.as_ref().map_or(0, Vec::len),
                    "calculation succeeded"
                );
                ResultArea::Result {
                    result: response.result,
                    heatmap: response.heatmap.unwrap_or_default(),
                }
            }
            Outcome::Failure(error) => {
                info!(ticket = ticket.0, message = %error.message, "calculation failed");
                ResultArea::Error(error)
            }
        };
    }
}
