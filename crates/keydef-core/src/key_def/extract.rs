use crate::{
    codec,
    error::{ErrorOrigin, KeyDefError},
    key_def::KeyDef,
    obs::sink::{self, MetricsEvent},
    region::{self, Region, RegionScope},
    tuple::Tuple,
};

impl KeyDef {
    /// Project the key fields of `tuple` into a new tuple, in part order.
    ///
    /// Absent nullable fields are written as nil. Scratch bytes come from the
    /// thread's region and are released before returning.
    pub fn extract_key(&self, tuple: &Tuple) -> Result<Tuple, KeyDefError> {
        let result = region::with_scope(|scope| self.extract_into(tuple, scope));
        match &result {
            Ok(key) => sink::record(MetricsEvent::Extract {
                bytes: key.as_bytes().len() as u64,
            }),
            Err(err) => sink::record_error(err),
        }

        result
    }

    /// Same as [`KeyDef::extract_key`], using a caller-owned region.
    pub fn extract_key_in(&self, tuple: &Tuple, region: &mut Region) -> Result<Tuple, KeyDefError> {
        self.extract_into(tuple, &mut region.scope())
    }

    fn extract_into(
        &self,
        tuple: &Tuple,
        scope: &mut RegionScope<'_>,
    ) -> Result<Tuple, KeyDefError> {
        let fields = self.resolve_all(tuple, ErrorOrigin::Extract)?;

        let mut header = Vec::with_capacity(5);
        codec::write_array_header(&mut header, fields.len())
            .map_err(|err| KeyDefError::codec(ErrorOrigin::Extract, err))?;
        scope.write_bytes(&header, "key header")?;

        for field in &fields {
            scope.write_bytes(field.raw.unwrap_or(codec::NIL), "key field")?;
        }

        tracing::trace!(
            parts = fields.len(),
            bytes = scope.bytes().len(),
            "extracted key"
        );

        // copy out before the scope rolls back
        Tuple::new(scope.bytes()).map_err(|err| KeyDefError::codec(ErrorOrigin::Extract, err))
    }
}
