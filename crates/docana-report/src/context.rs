//! One owned bundle of every domain registry plus the document buffer.

use crate::config::ReportConfig;
use docana_kernel::{
    AppendOutcome, DocanaError, DocumentBuffer, Domain, KeyArgRegistry, KeySource,
    domain_for_key,
};

/// One [`KeyArgRegistry`] per [`Domain`], addressed by domain.
#[derive(Debug, Clone)]
pub struct Registries {
    by_domain: Vec<KeyArgRegistry>,
}

impl Registries {
    pub fn new(max_entries: usize) -> Self {
        let by_domain = Domain::ALL
            .into_iter()
            .map(|domain| KeyArgRegistry::with_max_entries(domain, max_entries))
            .collect();
        Self { by_domain }
    }

    pub fn get(&self, domain: Domain) -> &KeyArgRegistry {
        &self.by_domain[domain.index()]
    }

    pub fn get_mut(&mut self, domain: Domain) -> &mut KeyArgRegistry {
        &mut self.by_domain[domain.index()]
    }

    pub fn init(&mut self) {
        for registry in &mut self.by_domain {
            registry.init();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyArgRegistry> {
        self.by_domain.iter()
    }

    /// Total entries across all domains.
    pub fn total_entries(&self) -> usize {
        self.by_domain.iter().map(KeyArgRegistry::len).sum()
    }
}

#[derive(Debug, Clone)]
pub struct ReportContext {
    registries: Registries,
    document: DocumentBuffer,
}

impl ReportContext {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            registries: Registries::new(config.max_registry_entries),
            document: DocumentBuffer::with_max_lines(config.max_document_lines),
        }
    }

    /// Empty every registry. The document is untouched.
    pub fn init(&mut self) {
        self.registries.init();
    }

    pub fn append<S: AsRef<str>>(
        &mut self,
        domain: Domain,
        key: &str,
        tokens: &[S],
        source: KeySource,
    ) -> Result<AppendOutcome, DocanaError> {
        self.registries.get_mut(domain).append(key, tokens, source)
    }

    /// Append `key` to the registry the routing table assigns it, if any.
    pub fn route<S: AsRef<str>>(
        &mut self,
        key: &str,
        tokens: &[S],
        source: KeySource,
    ) -> Result<Option<(Domain, AppendOutcome)>, DocanaError> {
        let Some(domain) = domain_for_key(key) else {
            return Ok(None);
        };
        let outcome = self.append(domain, key, tokens, source)?;
        Ok(Some((domain, outcome)))
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn document(&self) -> &DocumentBuffer {
        &self.document
    }

    pub fn into_document(self) -> DocumentBuffer {
        self.document
    }

    /// Read access to the registries alongside write access to the document.
    pub(crate) fn split(&mut self) -> (&Registries, &mut DocumentBuffer) {
        (&self.registries, &mut self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_keys_to_their_domain() {
        let mut ctx = ReportContext::new(&ReportConfig::default());
        let routed = ctx.route("FILTER:", &["g"], KeySource::FromFile).unwrap();
        assert_eq!(routed, Some((Domain::Filter, AppendOutcome::Appended(0))));
        assert_eq!(ctx.route("NGENTOT_LC:", &["5"], KeySource::FromFile).unwrap(), None);
        assert_eq!(ctx.registries().get(Domain::Filter).len(), 1);
        assert_eq!(ctx.registries().total_entries(), 1);
    }

    #[test]
    fn init_clears_every_registry() {
        let mut ctx = ReportContext::new(&ReportConfig::default());
        ctx.route("H0:", &["70"], KeySource::FromFile).unwrap();
        ctx.route("HOSTLIB_FILE:", &["x"], KeySource::FromFile).unwrap();
        ctx.init();
        assert!(ctx.registries().iter().all(KeyArgRegistry::is_empty));
        ctx.init();
        assert_eq!(ctx.registries().total_entries(), 0);
    }

    #[test]
    fn registries_share_the_configured_bound() {
        let config = ReportConfig {
            max_registry_entries: 1,
            ..ReportConfig::default()
        };
        let mut ctx = ReportContext::new(&config);
        ctx.route("FILTER:", &["g"], KeySource::FromFile).unwrap();
        let err = ctx.route("FILTER:", &["r"], KeySource::FromFile).unwrap_err();
        assert!(matches!(err, DocanaError::RegistryFull { domain: Domain::Filter, limit: 1 }));
        ctx.route("H0:", &["70"], KeySource::FromFile).unwrap();
    }
}
