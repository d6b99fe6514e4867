use crate::{
    config::{self, EngineConfig},
    error::{ErrorOrigin, KeyDefError},
    key_def::{KeyDef, KeyPart},
    obs::sink::{self, MetricsEvent},
    path,
};

impl KeyDef {
    /// Union of two definitions: every part of `self`, then each part of
    /// `other` whose (fieldno, path) is not already present.
    ///
    /// On a locator clash the part from `self` wins. Neither input changes.
    pub fn merge(&self, other: &Self) -> Result<Self, KeyDefError> {
        self.merge_with_config(other, config::current())
    }

    /// Merge under an explicit engine configuration.
    ///
    /// The union is held to the same part limit as a compiled definition.
    pub fn merge_with_config(
        &self,
        other: &Self,
        config: &EngineConfig,
    ) -> Result<Self, KeyDefError> {
        let appended: Vec<&KeyPart> = other
            .parts
            .iter()
            .filter(|part| !self.covers(part))
            .collect();
        let total = self.parts.len() + appended.len();
        if total > config.max_parts {
            return Err(KeyDefError::illegal_params(
                ErrorOrigin::Merge,
                format!(
                    "Too many key parts (expected at most {}, got {total})",
                    config.max_parts
                ),
            ));
        }

        let mut parts = Vec::new();
        parts.try_reserve_exact(total).map_err(|_| {
            KeyDefError::out_of_memory(
                ErrorOrigin::Merge,
                total * size_of::<KeyPart>(),
                "heap",
                "merged key parts",
            )
        })?;
        parts.extend(self.parts.iter().cloned());
        parts.extend(appended.into_iter().cloned());

        sink::record(MetricsEvent::Merge {
            parts: total as u64,
        });
        tracing::debug!(
            left = self.parts.len(),
            right = other.parts.len(),
            merged = total,
            "merged key definitions"
        );

        Ok(Self::from_parts(parts))
    }

    /// Whether some part already addresses the same field and path.
    fn covers(&self, candidate: &KeyPart) -> bool {
        self.parts.iter().any(|part| {
            part.fieldno == candidate.fieldno && path::paths_equal(part.path(), candidate.path())
        })
    }
}
