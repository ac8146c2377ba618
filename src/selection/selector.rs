use crate::{
    ConstructorDescriptor, ConstructorScorer, InjectError, InjectResult,
    InjectionHeuristic, Member, MemberAccess, MemberRef, MethodDescriptor,
    PropertyDescriptor, SelectorBuilder, SharedSettings,
    StandardInjectionHeuristic, Svc, TypeDescriptor, Visibility,
};
use std::fmt::{Debug, Formatter};
use tracing::{debug, trace};

/// Selects the members of an implementation type that take part in its
/// activation: the constructor candidates, and the properties and methods
/// that should be injected once an instance exists.
///
/// The selector holds no per-call state. Its settings are read again at the
/// start of every call, so changes made through a [`SharedSettings`] handle
/// apply to the next call.
///
/// ```
/// use injection_engine::{
///     ConfigureMember, ConstructorDescriptor, Inject, ParameterDescriptor,
///     PropertyDescriptor, Selector, TypeDescriptor,
/// };
///
/// let dog = TypeDescriptor::class("Dog")
///     .constructor(ConstructorDescriptor::new([]))
///     .constructor(ConstructorDescriptor::new([
///         ParameterDescriptor::new("leash", "Leash".into()),
///     ]))
///     .property(PropertyDescriptor::new("Owner", "Person".into()).with_attribute(Inject))
///     .property(PropertyDescriptor::new("Nickname", "string".into()))
///     .build();
///
/// let selector = Selector::default();
/// let candidates = selector.select_constructor_candidates(&dog).unwrap();
/// assert_eq!(2, candidates.len());
///
/// let chosen = selector.select_constructor(&dog).unwrap().unwrap();
/// assert_eq!(1, chosen.parameters().len());
///
/// let properties = selector.select_properties_for_injection(&dog).unwrap();
/// assert_eq!(1, properties.len());
/// ```
#[derive(Clone)]
pub struct Selector {
    constructor_scorer: Svc<dyn ConstructorScorer>,
    injection_heuristics: Vec<Svc<dyn InjectionHeuristic>>,
    settings: SharedSettings,
}

impl Selector {
    /// Creates a builder for a selector.
    #[must_use]
    pub fn builder() -> SelectorBuilder {
        SelectorBuilder::default()
    }

    pub(crate) fn new_from_parts(
        constructor_scorer: Svc<dyn ConstructorScorer>,
        injection_heuristics: Vec<Svc<dyn InjectionHeuristic>>,
        settings: SharedSettings,
    ) -> Self {
        Selector {
            constructor_scorer,
            injection_heuristics,
            settings,
        }
    }

    /// Gets the scorer used to rank constructor candidates.
    #[must_use]
    pub fn constructor_scorer(&self) -> &Svc<dyn ConstructorScorer> {
        &self.constructor_scorer
    }

    /// Gets the injection heuristics, in the order they are consulted.
    #[must_use]
    pub fn injection_heuristics(&self) -> &[Svc<dyn InjectionHeuristic>] {
        &self.injection_heuristics
    }

    /// Gets the settings this selector reads.
    #[must_use]
    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Gets the constructors that could be used to activate `ty`, in
    /// declaration order.
    ///
    /// Returns `None` for delegate types, which are never activated through
    /// a constructor. A type that simply has no accessible constructors
    /// returns an empty list instead. Static constructors are never
    /// candidates, and non-public constructors are only candidates when
    /// non-public injection is enabled.
    #[must_use]
    pub fn select_constructor_candidates<'a>(
        &self,
        ty: &'a TypeDescriptor,
    ) -> Option<Vec<&'a ConstructorDescriptor>> {
        if ty.is_delegate() {
            debug!(service_type = %ty.service_type(), "delegate types have no constructor candidates");
            return None;
        }

        let access = self.settings.get().member_access();
        let candidates = ty.get_constructors(access);
        debug!(
            service_type = %ty.service_type(),
            count = candidates.len(),
            "selected constructor candidates"
        );
        Some(candidates)
    }

    /// Gets the properties of `ty` that should be injected.
    ///
    /// Every accessible property, including inherited ones, is offered to
    /// each heuristic, and a property is selected if any heuristic approves
    /// it. A property redeclared by a more derived type is only offered in
    /// its most derived form. Properties are returned in the order
    /// [`TypeDescriptor::get_properties`] lists them.
    ///
    /// When both non-public injection and parent private property injection
    /// are enabled, the private properties declared on each ancestor are
    /// offered as well and approved ones are appended, nearest ancestor
    /// first.
    pub fn select_properties_for_injection<'a>(
        &self,
        ty: &'a TypeDescriptor,
    ) -> InjectResult<Vec<&'a PropertyDescriptor>> {
        let settings = self.settings.get();
        let access = settings.member_access();

        let mut selected = Vec::new();
        for property in ty.get_properties(access) {
            if self.should_inject(MemberRef::Property(property))? {
                selected.push(property);
            }
        }

        if settings.inject_parent_private_properties
            && access == MemberAccess::All
        {
            for ancestor in ty.ancestors() {
                trace!(
                    service_type = %ty.service_type(),
                    ancestor = %ancestor.service_type(),
                    "checking private properties of ancestor"
                );
                for property in
                    ancestor.declared_properties_with(Visibility::Private)
                {
                    if self.should_inject(MemberRef::Property(property))? {
                        selected.push(property);
                    }
                }
            }
        }

        debug!(
            service_type = %ty.service_type(),
            count = selected.len(),
            "selected properties for injection"
        );
        Ok(selected)
    }

    /// Gets the methods of `ty` that should be injected. Methods are
    /// filtered the same way as properties, except that private methods of
    /// ancestors are never offered.
    pub fn select_methods_for_injection<'a>(
        &self,
        ty: &'a TypeDescriptor,
    ) -> InjectResult<Vec<&'a MethodDescriptor>> {
        let access = self.settings.get().member_access();

        let mut selected = Vec::new();
        for method in ty.get_methods(access) {
            if self.should_inject(MemberRef::Method(method))? {
                selected.push(method);
            }
        }

        debug!(
            service_type = %ty.service_type(),
            count = selected.len(),
            "selected methods for injection"
        );
        Ok(selected)
    }

    /// Scores the constructor candidates of `ty` and returns the one with
    /// the highest score.
    ///
    /// Returns `None` when `ty` has no candidates, and
    /// [`InjectError::AmbiguousConstructor`] when more than one candidate
    /// shares the highest score.
    pub fn select_constructor<'a>(
        &self,
        ty: &'a TypeDescriptor,
    ) -> InjectResult<Option<&'a ConstructorDescriptor>> {
        let candidates = match self.select_constructor_candidates(ty) {
            Some(candidates) => candidates,
            None => return Ok(None),
        };

        let mut best: Option<(&ConstructorDescriptor, i64)> = None;
        let mut tied = 0;
        for candidate in candidates {
            let score = self.constructor_scorer.score(candidate)?;
            trace!(
                service_type = %ty.service_type(),
                parameters = candidate.parameters().len(),
                score,
                "scored constructor"
            );

            match best {
                Some((_, best_score)) if score < best_score => {}
                Some((_, best_score)) if score == best_score => tied += 1,
                _ => {
                    best = Some((candidate, score));
                    tied = 1;
                }
            }
        }

        if tied > 1 {
            return Err(InjectError::AmbiguousConstructor {
                service_type: ty.service_type().clone(),
                count: tied,
            });
        }

        Ok(best.map(|(constructor, _)| constructor))
    }

    fn should_inject(&self, member: MemberRef<'_>) -> InjectResult<bool> {
        for heuristic in &self.injection_heuristics {
            if heuristic.should_inject(member)? {
                trace!(
                    member = member.name(),
                    declaring_type = ?member.declaring_type(),
                    "member approved for injection"
                );
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl Default for Selector {
    fn default() -> Self {
        let mut builder = Selector::builder();
        builder.add_heuristic(StandardInjectionHeuristic);
        builder.build()
    }
}

impl Debug for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("injection_heuristics", &self.injection_heuristics.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
