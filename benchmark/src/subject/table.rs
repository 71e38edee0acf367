//! @ai:module:intent Static registration of subject operations
//! @ai:module:layer domain
//! @ai:module:public_api BenchmarkSubject, Operation, OperationTable
//! @ai:module:stateless true

use crate::subject::marker::{BenchmarkMarker, MethodMarker};

type OperationFn<S> = Box<dyn Fn(&mut S) -> anyhow::Result<()>>;

/// @ai:intent Contract every benchmark suite implements
/// @ai:invariant operations() returns the same table on every call
pub trait BenchmarkSubject: Sized + 'static {
    /// @ai:intent Identity of the subject used in reports
    /// @ai:effects pure
    fn subject_name() -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    /// @ai:intent Construct a fresh instance with no arguments
    fn instantiate() -> anyhow::Result<Self>;

    /// @ai:intent Declare the operations of this subject in discovery order
    /// @ai:effects pure
    fn operations() -> OperationTable<Self>;
}

/// @ai:intent A named, callable operation with its declared markers
pub struct Operation<S> {
    name: String,
    markers: Vec<MethodMarker>,
    parameters: Vec<String>,
    call: OperationFn<S>,
}

impl<S> Operation<S> {
    /// @ai:intent Create an unmarked operation
    /// @ai:effects pure
    pub fn new<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&mut S) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            markers: Vec::new(),
            parameters: Vec::new(),
            call: Box::new(call),
        }
    }

    /// @ai:intent Attach a role marker
    /// @ai:effects pure
    pub fn marked(mut self, marker: impl Into<MethodMarker>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// @ai:intent Declare an input parameter the operation expects
    /// @ai:effects pure
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn markers(&self) -> &[MethodMarker] {
        &self.markers
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// @ai:intent Invoke the operation on the subject
    /// @ai:effects subject-defined
    pub(crate) fn invoke(&self, subject: &mut S) -> anyhow::Result<()> {
        (self.call)(subject)
    }
}

impl<S> std::fmt::Debug for Operation<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("markers", &self.markers)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// @ai:intent Ordered operation list built declaratively by a subject
pub struct OperationTable<S> {
    operations: Vec<Operation<S>>,
}

impl<S> OperationTable<S> {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// @ai:intent Register an operation as-is
    /// @ai:effects pure
    pub fn operation(mut self, operation: Operation<S>) -> Self {
        self.operations.push(operation);
        self
    }

    /// @ai:intent Register a no-argument setup operation
    /// @ai:effects pure
    pub fn setup<F>(self, name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&mut S) -> anyhow::Result<()> + 'static,
    {
        self.operation(Operation::new(name, call).marked(MethodMarker::Setup))
    }

    /// @ai:intent Register a no-argument benchmark operation
    /// @ai:effects pure
    pub fn benchmark<F>(self, name: impl Into<String>, marker: BenchmarkMarker, call: F) -> Self
    where
        F: Fn(&mut S) -> anyhow::Result<()> + 'static,
    {
        self.operation(Operation::new(name, call).marked(marker))
    }

    /// @ai:intent Register a no-argument teardown operation
    /// @ai:effects pure
    pub fn teardown<F>(self, name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&mut S) -> anyhow::Result<()> + 'static,
    {
        self.operation(Operation::new(name, call).marked(MethodMarker::TearDown))
    }

    /// @ai:pre index was produced by discovery over this same table
    pub(crate) fn at(&self, index: usize) -> &Operation<S> {
        &self.operations[index]
    }

    pub fn get(&self, index: usize) -> Option<&Operation<S>> {
        self.operations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation<S>> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<S> Default for OperationTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        hits: u32,
    }

    impl BenchmarkSubject for Counter {
        fn instantiate() -> anyhow::Result<Self> {
            Ok(Self { hits: 0 })
        }

        fn operations() -> OperationTable<Self> {
            OperationTable::new()
                .setup("reset", |c: &mut Counter| {
                    c.hits = 0;
                    Ok(())
                })
                .benchmark("hit", BenchmarkMarker::new().iterations(3), |c: &mut Counter| {
                    c.hits += 1;
                    Ok(())
                })
                .operation(Operation::new("helper", |_: &mut Counter| Ok(())))
        }
    }

    #[test]
    fn test_subject_name_strips_module_path() {
        assert_eq!(Counter::subject_name(), "Counter");
    }

    #[test]
    fn test_table_preserves_registration_order() {
        let table = Counter::operations();
        let names: Vec<_> = table.iter().map(|op| op.name()).collect();
        assert_eq!(names, vec!["reset", "hit", "helper"]);
        assert!(table.get(2).unwrap().markers().is_empty());
    }

    #[test]
    fn test_invoke_mutates_subject() {
        let table = Counter::operations();
        let mut counter = Counter::instantiate().unwrap();
        let hit = table.get(1).unwrap();

        hit.invoke(&mut counter).unwrap();
        hit.invoke(&mut counter).unwrap();
        assert_eq!(counter.hits, 2);
    }

    #[test]
    fn test_declared_parameters_are_recorded() {
        let op = Operation::new("seed", |_: &mut Counter| Ok(())).with_parameter("count");
        assert_eq!(op.parameters(), ["count".to_string()]);
    }
}
