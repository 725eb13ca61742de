use crate::{
    config::model::ReticleConfig,
    foundation::error::{ReticleError, ReticleResult},
    foundation::math::Fnv1a64,
};

/// 128-bit content hash of a [`ReticleConfig`].
///
/// Any edit that changes the serialized document changes the fingerprint, including in-place
/// edits of list elements that leave the list length alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ConfigFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl ConfigFingerprint {
    pub fn of(config: &ReticleConfig) -> ReticleResult<Self> {
        let value =
            serde_json::to_value(config).map_err(|e| ReticleError::serde(e.to_string()))?;
        Ok(fingerprint_value(&value))
    }
}

pub(crate) fn fingerprint_value(value: &serde_json::Value) -> ConfigFingerprint {
    let mut h = DualHasher::new();
    h.value(value);
    h.finish()
}

/// Two independently seeded FNV-1a streams fed the same bytes.
struct DualHasher {
    hi: Fnv1a64,
    lo: Fnv1a64,
}

impl DualHasher {
    fn new() -> Self {
        Self {
            hi: Fnv1a64::new(Fnv1a64::OFFSET_BASIS),
            lo: Fnv1a64::new(Fnv1a64::ALT_BASIS),
        }
    }

    fn finish(self) -> ConfigFingerprint {
        ConfigFingerprint {
            hi: self.hi.finish(),
            lo: self.lo.finish(),
        }
    }

    fn tag(&mut self, tag: u8) {
        self.hi.write_u8(tag);
        self.lo.write_u8(tag);
    }

    fn count(&mut self, n: usize) {
        self.hi.write_u64(n as u64);
        self.lo.write_u64(n as u64);
    }

    fn text(&mut self, s: &str) {
        self.count(s.len());
        self.hi.write_bytes(s.as_bytes());
        self.lo.write_bytes(s.as_bytes());
    }

    /// Type tag, then contents; object keys are visited in sorted order.
    fn value(&mut self, v: &serde_json::Value) {
        use serde_json::Value;
        match v {
            Value::Null => self.tag(0),
            Value::Bool(x) => {
                self.tag(1);
                self.tag(u8::from(*x));
            }
            Value::Number(n) => {
                self.tag(2);
                self.text(&n.to_string());
            }
            Value::String(s) => {
                self.tag(3);
                self.text(s);
            }
            Value::Array(items) => {
                self.tag(4);
                self.count(items.len());
                items.iter().for_each(|item| self.value(item));
            }
            Value::Object(map) => {
                self.tag(5);
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|x, y| x.0.cmp(y.0));
                self.count(entries.len());
                for (key, item) in entries {
                    self.text(key);
                    self.value(item);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/fingerprint.rs"]
mod tests;
