use crate::{
    ConstructorScorer, InjectionHeuristic, Selector, SharedSettings,
    StandardConstructorScorer, Svc,
};

/// A builder for a [`Selector`].
///
/// The builder starts out with a [`StandardConstructorScorer`], no
/// injection heuristics and default settings. A selector without
/// heuristics never selects any properties or methods.
///
/// ```
/// use injection_engine::{
///     InjectionSettings, MemberRef, PredicateHeuristic, Selector,
///     SharedSettings, StandardInjectionHeuristic,
/// };
///
/// let settings = SharedSettings::new(InjectionSettings {
///     inject_non_public: true,
///     ..InjectionSettings::default()
/// });
///
/// let mut builder = Selector::builder();
/// builder.add_heuristic(StandardInjectionHeuristic);
/// builder.add_heuristic(PredicateHeuristic::new(|member: MemberRef<'_>| {
///     member.as_method().is_some()
/// }));
/// builder.use_settings(settings.clone());
///
/// let selector = builder.build();
/// assert_eq!(2, selector.injection_heuristics().len());
/// assert!(selector.settings().get().inject_non_public);
/// ```
pub struct SelectorBuilder {
    constructor_scorer: Svc<dyn ConstructorScorer>,
    injection_heuristics: Vec<Svc<dyn InjectionHeuristic>>,
    settings: SharedSettings,
}

impl SelectorBuilder {
    /// Sets the scorer used to rank constructor candidates, replacing the
    /// current one.
    pub fn constructor_scorer<S: ConstructorScorer>(&mut self, scorer: S) {
        self.constructor_scorer = Svc::new(scorer);
    }

    /// Sets a shared scorer used to rank constructor candidates.
    pub fn constructor_scorer_shared(
        &mut self,
        scorer: Svc<dyn ConstructorScorer>,
    ) {
        self.constructor_scorer = scorer;
    }

    /// Adds an injection heuristic. Heuristics are consulted in the order
    /// they are added.
    pub fn add_heuristic<H: InjectionHeuristic>(&mut self, heuristic: H) {
        self.add_heuristic_shared(Svc::new(heuristic));
    }

    /// Adds a shared injection heuristic.
    pub fn add_heuristic_shared(
        &mut self,
        heuristic: Svc<dyn InjectionHeuristic>,
    ) {
        self.injection_heuristics.push(heuristic);
    }

    /// Removes every injection heuristic added so far.
    pub fn clear_heuristics(&mut self) {
        self.injection_heuristics.clear();
    }

    /// Borrows the settings the selector will read.
    #[must_use]
    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Makes the selector read `settings`. Changes made through other
    /// handles to the same settings are seen by the selector.
    pub fn use_settings(&mut self, settings: SharedSettings) {
        self.settings = settings;
    }

    /// Builds the selector.
    #[must_use]
    pub fn build(self) -> Selector {
        Selector::new_from_parts(
            self.constructor_scorer,
            self.injection_heuristics,
            self.settings,
        )
    }
}

impl Default for SelectorBuilder {
    fn default() -> Self {
        SelectorBuilder {
            constructor_scorer: Svc::new(StandardConstructorScorer::new()),
            injection_heuristics: Vec::new(),
            settings: SharedSettings::default(),
        }
    }
}
