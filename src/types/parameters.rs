//! Model tuning knobs (`options` on generation, `parameters` on model creation).

use super::wire::{drop_absent, opt, Param, WireForm, WireValue};
use serde_json::{Map, Value};

/// Optional sampling and runtime parameters; unset fields are omitted from the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelParameters {
    pub mirostat: Option<i64>,
    pub mirostat_eta: Option<f64>,
    pub mirostat_tau: Option<f64>,
    pub num_ctx: Option<i64>,
    pub repeat_last_n: Option<i64>,
    pub repeat_penalty: Option<f64>,
    pub temperature: Option<f64>,
    pub seed: Option<i64>,
    pub stop: Option<String>,
    pub num_predict: Option<i64>,
    pub top_k: Option<i64>,
    pub top_p: Option<f64>,
    pub min_p: Option<f64>,
}

impl ModelParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mirostat(mut self, v: i64) -> Self {
        self.mirostat = Some(v);
        self
    }

    pub fn mirostat_eta(mut self, v: f64) -> Self {
        self.mirostat_eta = Some(v);
        self
    }

    pub fn mirostat_tau(mut self, v: f64) -> Self {
        self.mirostat_tau = Some(v);
        self
    }

    pub fn num_ctx(mut self, v: i64) -> Self {
        self.num_ctx = Some(v);
        self
    }

    pub fn repeat_last_n(mut self, v: i64) -> Self {
        self.repeat_last_n = Some(v);
        self
    }

    pub fn repeat_penalty(mut self, v: f64) -> Self {
        self.repeat_penalty = Some(v);
        self
    }

    pub fn temperature(mut self, v: f64) -> Self {
        self.temperature = Some(v);
        self
    }

    pub fn seed(mut self, v: i64) -> Self {
        self.seed = Some(v);
        self
    }

    pub fn stop(mut self, v: impl Into<String>) -> Self {
        self.stop = Some(v.into());
        self
    }

    pub fn num_predict(mut self, v: i64) -> Self {
        self.num_predict = Some(v);
        self
    }

    pub fn top_k(mut self, v: i64) -> Self {
        self.top_k = Some(v);
        self
    }

    pub fn top_p(mut self, v: f64) -> Self {
        self.top_p = Some(v);
        self
    }

    pub fn min_p(mut self, v: f64) -> Self {
        self.min_p = Some(v);
        self
    }
}

impl WireForm for ModelParameters {
    fn to_wire_form(&self) -> Map<String, Value> {
        drop_absent([
            ("mirostat", opt(self.mirostat)),
            ("mirostat_eta", opt(self.mirostat_eta)),
            ("mirostat_tau", opt(self.mirostat_tau)),
            ("num_ctx", opt(self.num_ctx)),
            ("repeat_last_n", opt(self.repeat_last_n)),
            ("repeat_penalty", opt(self.repeat_penalty)),
            ("temperature", opt(self.temperature)),
            ("seed", opt(self.seed)),
            ("stop", opt(self.stop.clone())),
            ("num_predict", opt(self.num_predict)),
            ("top_k", opt(self.top_k)),
            ("top_p", opt(self.top_p)),
            ("min_p", opt(self.min_p)),
        ])
    }
}

impl WireValue for ModelParameters {
    fn to_wire_value(&self) -> Value {
        Value::Object(self.to_wire_form())
    }
}

impl From<ModelParameters> for Param<ModelParameters> {
    fn from(params: ModelParameters) -> Self {
        Param::Structured(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_parameters_serialize_to_empty_object() {
        let wire = ModelParameters::new().to_wire_value();
        assert_eq!(wire, json!({}));
    }

    #[test]
    fn only_set_keys_are_emitted_in_declared_order() {
        let params = ModelParameters::new()
            .top_p(0.9)
            .seed(42)
            .num_ctx(4096)
            .stop("</s>");
        let wire = params.to_wire_form();
        let keys: Vec<_> = wire.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["num_ctx", "seed", "stop", "top_p"]);
        assert_eq!(wire["seed"], json!(42));
        assert_eq!(wire["top_p"], json!(0.9));
    }

    #[test]
    fn every_field_maps_to_its_snake_case_key() {
        let params = ModelParameters {
            mirostat: Some(1),
            mirostat_eta: Some(0.1),
            mirostat_tau: Some(5.0),
            num_ctx: Some(2048),
            repeat_last_n: Some(64),
            repeat_penalty: Some(1.1),
            temperature: Some(0.7),
            seed: Some(3),
            stop: Some("\n".into()),
            num_predict: Some(128),
            top_k: Some(40),
            top_p: Some(0.95),
            min_p: Some(0.05),
        };
        let wire = params.to_wire_form();
        assert_eq!(wire.len(), 13);
        for key in [
            "mirostat",
            "mirostat_eta",
            "mirostat_tau",
            "num_ctx",
            "repeat_last_n",
            "repeat_penalty",
            "temperature",
            "seed",
            "stop",
            "num_predict",
            "top_k",
            "top_p",
            "min_p",
        ] {
            assert!(wire.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn zero_values_are_not_absent() {
        let wire = ModelParameters::new().temperature(0.0).seed(0).to_wire_form();
        assert_eq!(wire.len(), 2);
    }
}
