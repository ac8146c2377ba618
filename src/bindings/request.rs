use crate::ServiceType;
use std::sync::Arc;

/// Information about an active request, handed to binding conditions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestInfo {
    service_path: Vec<ServiceType>,
    name: Option<Arc<str>>,
}

impl RequestInfo {
    /// Creates a new, empty instance of [`RequestInfo`].
    #[must_use]
    pub fn new() -> Self {
        RequestInfo::default()
    }

    /// Creates a new child instance of [`RequestInfo`] with the given service
    /// appended to the end of the request path. The requested name is not
    /// inherited by the child.
    #[must_use]
    pub fn with_request(&self, service: ServiceType) -> Self {
        let mut child = self.clone();
        child.service_path.push(service);
        child.name = None;
        child
    }

    /// Requests a binding with the given name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Gets the current request path, root first. This can be used to
    /// choose a binding based on what it's being injected into.
    #[must_use]
    pub fn service_path(&self) -> &[ServiceType] {
        &self.service_path
    }

    /// Gets the service currently being requested.
    #[must_use]
    pub fn service(&self) -> Option<&ServiceType> {
        self.service_path.last()
    }

    /// Gets the service the current service is being injected into.
    #[must_use]
    pub fn parent(&self) -> Option<&ServiceType> {
        self.service_path.iter().rev().nth(1)
    }

    /// Gets the binding name that was requested, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_request_extends_path() {
        let root = RequestInfo::new().with_request("Controller".into());
        let child = root.with_request("ILogger".into());

        assert_eq!(1, root.service_path().len());
        assert_eq!(
            &[ServiceType::named("Controller"), ServiceType::named("ILogger")],
            child.service_path()
        );
        assert_eq!(Some(&ServiceType::named("ILogger")), child.service());
        assert_eq!(Some(&ServiceType::named("Controller")), child.parent());
        assert_eq!(None, root.parent());
    }

    #[test]
    fn name_is_not_inherited() {
        let root = RequestInfo::new()
            .with_request("ILogger".into())
            .with_name("audit");
        assert_eq!(Some("audit"), root.name());

        let child = root.with_request("IClock".into());
        assert_eq!(None, child.name());
    }
}
