//! Test classes and their methods.

use idmatrix_filter::{MethodDeclaration, RuleDeclaration, Selection};
use idmatrix_matrix::{MatrixCell, MatrixConfiguration};

use crate::context::{Authenticator, CellContext};
use crate::error::TestFailure;

/// Builds a fresh fixture for one (cell, method) combination.
pub type Setup<F> = Box<dyn Fn(&MatrixCell) -> Result<F, String> + Send + Sync>;

/// Releases a fixture. Runs even if the method body failed.
pub type Teardown<F> = Box<dyn Fn(&mut F) -> Result<(), String> + Send + Sync>;

/// A method body.
pub type MethodBody<F> = Box<
    dyn Fn(&mut CellContext<'_, F>) -> Result<(), TestFailure<<F as Authenticator>::Kind>>
        + Send
        + Sync,
>;

/// One test method and its filter declaration.
pub struct TestMethod<F: Authenticator> {
    declaration: MethodDeclaration,
    body: MethodBody<F>,
    ignored: bool,
    expected_failure: Option<F::Kind>,
}

impl<F: Authenticator> TestMethod<F> {
    pub fn new<B>(name: impl Into<String>, body: B) -> Self
    where
        B: Fn(&mut CellContext<'_, F>) -> Result<(), TestFailure<F::Kind>> + Send + Sync + 'static,
    {
        Self {
            declaration: MethodDeclaration::new(name),
            body: Box::new(body),
            ignored: false,
            expected_failure: None,
        }
    }

    /// Only run for the listed producers and consumers.
    pub fn run_with(mut self, rule: RuleDeclaration) -> Self {
        self.declaration = self.declaration.run_with(rule);
        self
    }

    /// Skip for the listed producers or consumers.
    pub fn ignore_for(mut self, rule: RuleDeclaration) -> Self {
        self.declaration = self.declaration.ignore_for(rule);
        self
    }

    /// Report the method as ignored in every cell.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// The body must end with an unhandled failure of this kind.
    pub fn expecting(mut self, kind: F::Kind) -> Self {
        self.expected_failure = Some(kind);
        self
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn declaration(&self) -> &MethodDeclaration {
        &self.declaration
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn expected_failure(&self) -> Option<&F::Kind> {
        self.expected_failure.as_ref()
    }

    pub(crate) fn body(&self) -> &MethodBody<F> {
        &self.body
    }
}

/// A matrix configuration, a fixture lifecycle and an ordered list of methods.
pub struct TestClass<F: Authenticator> {
    configuration: MatrixConfiguration,
    class_rule: Selection,
    setup: Setup<F>,
    teardown: Option<Teardown<F>>,
    methods: Vec<TestMethod<F>>,
}

impl<F: Authenticator> TestClass<F> {
    /// The class-level include rule is the configuration's own producer and
    /// consumer sets.
    pub fn new<S>(configuration: MatrixConfiguration, setup: S) -> Self
    where
        S: Fn(&MatrixCell) -> Result<F, String> + Send + Sync + 'static,
    {
        let class_rule = Selection::new(
            configuration.producers().clone(),
            configuration.consumers().clone(),
        );
        Self {
            configuration,
            class_rule,
            setup: Box::new(setup),
            teardown: None,
            methods: Vec::new(),
        }
    }

    pub fn with_teardown<T>(mut self, teardown: T) -> Self
    where
        T: Fn(&mut F) -> Result<(), String> + Send + Sync + 'static,
    {
        self.teardown = Some(Box::new(teardown));
        self
    }

    pub fn method(mut self, method: TestMethod<F>) -> Self {
        self.methods.push(method);
        self
    }

    pub fn name(&self) -> &str {
        self.configuration.class()
    }

    pub fn configuration(&self) -> &MatrixConfiguration {
        &self.configuration
    }

    pub fn class_rule(&self) -> &Selection {
        &self.class_rule
    }

    pub fn methods(&self) -> &[TestMethod<F>] {
        &self.methods
    }

    pub(crate) fn setup(&self, cell: &MatrixCell) -> Result<F, String> {
        (self.setup)(cell)
    }

    pub(crate) fn teardown(&self, fixture: &mut F) -> Result<(), String> {
        match &self.teardown {
            Some(teardown) => teardown(fixture),
            None => Ok(()),
        }
    }
}
