use crate::types::{InputParameters, ParamKey, Preset};

/// Owns the form's raw text. Nothing here parses numbers; coercion happens
/// when a submission is built.
#[derive(Clone, Debug, Default)]
pub struct InputCollector {
    params: InputParameters,
}

impl InputCollector {
    pub fn params(&self) -> &InputParameters {
        &self.params
    }

    /// Stores `raw` under `name`. Returns false, leaving the mapping
    /// untouched, when `name` is not one of the six parameters.
    pub fn set_field(&mut self, name: &str, raw: impl Into<String>) -> bool {
        match ParamKey::from_name(name) {
            Some(key) => {
                self.params.set(key, raw);
                true
            }
            None => false,
        }
    }

    pub fn apply_preset(&mut self, preset: &Preset) {
        for (key, raw) in preset.values {
            self.params.set(key, raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PRESETS;

    #[test]
    fn starts_with_fixed_defaults() {
        let inputs = InputCollector::default();
        let expected = [
            (ParamKey::K, "1000"),
            (ParamKey::I, "10"),
            (ParamKey::F, "500"),
            (ParamKey::S, "50"),
            (ParamKey::Cr0, "5"),
            (ParamKey::Cd0, "50"),
        ];
        for (key, raw) in expected {
            assert_eq!(inputs.params().get(key), raw);
        }
    }

    #[test]
    fn stores_transient_text_verbatim() {
        let mut inputs = InputCollector::default();
        assert!(inputs.set_field("K", "-"));
        assert!(inputs.set_field("CR0", ""));
        assert_eq!(inputs.params().get(ParamKey::K), "-");
        assert_eq!(inputs.params().get(ParamKey::Cr0), "");
    }

    #[test]
    fn every_wire_name_is_accepted() {
        let mut inputs = InputCollector::default();
        for key in ParamKey::ALL {
            assert!(inputs.set_field(key.name(), format!("{} edited", key.name())));
        }
        assert_eq!(inputs.params().get(ParamKey::Cr0), "CR0 edited");
        assert_eq!(inputs.params().get(ParamKey::Cd0), "CD0 edited");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut inputs = InputCollector::default();
        let before = inputs.params().clone();
        assert!(!inputs.set_field("X", "12"));
        assert!(!inputs.set_field("cr0", "12"));
        assert_eq!(inputs.params(), &before);
    }

    #[test]
    fn preset_overwrites_every_field() {
        let mut inputs = InputCollector::default();
        inputs.set_field("S", "abc");
        inputs.apply_preset(&PRESETS[1]);
        assert_eq!(inputs.params().get(ParamKey::I), "60");
        assert_eq!(inputs.params().get(ParamKey::S), "40");

        inputs.apply_preset(&PRESETS[0]);
        assert_eq!(inputs.params(), InputCollector::default().params());
    }
}
