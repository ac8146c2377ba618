use crate::{
    Binding, BindingMap, BindingResolver, Bindings, InjectResult,
    OpenGenericBindingResolver, ServiceType, StandardBindingResolver, Svc,
};
use std::{
    fmt::{Debug, Formatter},
    iter::FusedIterator,
    slice::Iter,
};
use tracing::{debug, trace};

/// An ordered collection of [`BindingResolver`]s.
///
/// Resolving a service queries every resolver in the order they were added
/// and concatenates what they return. Results are not deduplicated: if two
/// resolvers return the same binding, it appears twice.
///
/// The default chain holds a [`StandardBindingResolver`] followed by an
/// [`OpenGenericBindingResolver`].
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Vec<Svc<dyn BindingResolver>>,
}

impl ResolverChain {
    /// Creates a chain with no resolvers.
    #[must_use]
    pub fn new() -> Self {
        ResolverChain {
            resolvers: Vec::new(),
        }
    }

    /// Appends a resolver to the end of the chain.
    pub fn add<R: BindingResolver>(&mut self, resolver: R) {
        self.add_shared(Svc::new(resolver));
    }

    /// Appends a shared resolver to the end of the chain.
    pub fn add_shared(&mut self, resolver: Svc<dyn BindingResolver>) {
        self.resolvers.push(resolver);
    }

    /// Gets the resolvers in this chain, in query order.
    #[must_use]
    pub fn resolvers(&self) -> &[Svc<dyn BindingResolver>] {
        &self.resolvers
    }

    /// Lazily resolves the bindings that could satisfy a request for
    /// `service`. Each resolver is queried only once the bindings of the
    /// resolvers before it have been consumed. If a resolver yields an error,
    /// the error is returned as is and the resolution ends.
    #[must_use]
    pub fn resolve<'a>(
        &'a self,
        bindings: &'a BindingMap,
        service: &'a ServiceType,
    ) -> Resolution<'a> {
        trace!(%service, resolvers = self.resolvers.len(), "resolving bindings");
        Resolution {
            resolvers: self.resolvers.iter(),
            bindings,
            service,
            current: None,
            resolver_index: 0,
            matched: 0,
            failed: false,
        }
    }

    /// Eagerly resolves every binding that could satisfy a request for
    /// `service`.
    pub fn resolve_all(
        &self,
        bindings: &BindingMap,
        service: &ServiceType,
    ) -> InjectResult<Vec<Svc<Binding>>> {
        self.resolve(bindings, service).collect()
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        let mut chain = ResolverChain::new();
        chain.add(StandardBindingResolver);
        chain.add(OpenGenericBindingResolver);
        chain
    }
}

impl Debug for ResolverChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

/// An iterator over the bindings that could satisfy a request, in resolver
/// order. Created by [`ResolverChain::resolve`].
pub struct Resolution<'a> {
    resolvers: Iter<'a, Svc<dyn BindingResolver>>,
    bindings: &'a BindingMap,
    service: &'a ServiceType,
    current: Option<Bindings<'a>>,
    resolver_index: usize,
    matched: usize,
    failed: bool,
}

impl Resolution<'_> {
    fn finish_resolver(&mut self) {
        if self.current.take().is_some() {
            debug!(
                service = %self.service,
                resolver = self.resolver_index,
                matched = self.matched,
                "resolver finished"
            );
            self.resolver_index += 1;
            self.matched = 0;
        }
    }
}

impl<'a> Iterator for Resolution<'a> {
    type Item = InjectResult<Svc<Binding>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            // Try to get next binding from the current resolver
            match self.current.as_mut().and_then(Iterator::next) {
                Some(Ok(binding)) => {
                    self.matched += 1;
                    return Some(Ok(binding));
                }
                Some(Err(error)) => {
                    self.current = None;
                    self.failed = true;
                    return Some(Err(error));
                }
                None => self.finish_resolver(),
            }

            // Try to go to next resolver
            let resolver = self.resolvers.next()?;
            self.current = Some(resolver.resolve(self.bindings, self.service));
        }
    }
}

impl FusedIterator for Resolution<'_> {}

impl Debug for Resolution<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("service", self.service)
            .field("resolver_index", &self.resolver_index)
            .field("remaining_resolvers", &self.resolvers.len())
            .finish()
    }
}
