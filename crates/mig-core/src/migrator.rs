//! Recursive value traversal
//!
//! [`ValueMigrator`] walks one stored value, offers every leaf to the
//! registered migrations and writes replacements back into the enclosing
//! container.
//!
//! # Rules
//! - Containers are mutated in place and never replaced. Only a replaced
//!   leaf (or an optional wrapping one) is signaled upward, as `Some(new)`.
//! - Composite field names and dictionary keys are snapshotted before any
//!   child is migrated.
//! - A changed dictionary key is removed, then the (possibly migrated) value
//!   is inserted under the new key. Landing on another live key is a
//!   structural violation.
//! - Migrations chain: each one sees the output of the previous replacement.
//! - Recoverable migration errors are reported and the leaf is kept; fatal
//!   ones and structural violations abort with [`MigrationError`].

use crate::error::{MigrationError, Result};
use crate::migration::{Migration, StorageKey, StorageMapKey};
use crate::reporter::Reporter;
use mig_values::{CompositeValue, Value};
use tracing::{trace, warn};

/// Counters of one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Leaves offered to migrations
    pub leaves_visited: usize,
    /// Successful replacements reported
    pub migrated: usize,
    /// Recoverable errors reported
    pub errors: usize,
}

/// Applies migrations to every leaf of a value graph
pub struct ValueMigrator<'a> {
    migrations: &'a [Box<dyn Migration>],
    reporter: &'a mut dyn Reporter,
    stats: TraversalStats,
}

impl<'a> ValueMigrator<'a> {
    /// Create migrator running `migrations` in order
    #[must_use]
    pub fn new(migrations: &'a [Box<dyn Migration>], reporter: &'a mut dyn Reporter) -> Self {
        Self {
            migrations,
            reporter,
            stats: TraversalStats::default(),
        }
    }

    /// Counters accumulated so far
    #[inline]
    #[must_use]
    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// Migrate `value` and everything below it
    ///
    /// Returns the replacement for `value` itself, if any. The caller owns
    /// the slot holding `value` and decides whether to write it back.
    ///
    /// # Errors
    /// Returns error on a fatal migration error or when a container changed
    /// under the traversal
    pub fn migrate_nested_value(
        &mut self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        value: &mut Value,
    ) -> Result<Option<Value>> {
        match value {
            Value::Some(inner) => Ok(self
                .migrate_nested_value(storage_key, storage_map_key, inner)?
                .map(Value::some)),

            Value::Array(array) => {
                let count = array.count();
                for index in 0..count {
                    let element = array.get_mut(index).ok_or_else(|| {
                        MigrationError::Invariant(format!(
                            "array element {index} of {count} vanished during migration"
                        ))
                    })?;
                    if let Some(new_element) =
                        self.migrate_nested_value(storage_key, storage_map_key, element)?
                    {
                        array.set(index, new_element)?;
                    }
                }
                Ok(None)
            }

            Value::Composite(composite) => {
                let field_names: Vec<String> =
                    composite.field_names().map(str::to_owned).collect();

                for field_name in field_names {
                    let field = field_slot(composite, &field_name)?;
                    if let Some(new_field) =
                        self.migrate_nested_value(storage_key, storage_map_key, field)?
                    {
                        composite.set_member(field_name, new_field);
                    }
                }
                Ok(None)
            }

            Value::Dictionary(dictionary) => {
                let existing_keys: Vec<Value> = dictionary.keys().cloned().collect();

                for existing_key in existing_keys {
                    if !dictionary.contains_key(&existing_key) {
                        return Err(MigrationError::Invariant(format!(
                            "dictionary key {existing_key} vanished during migration"
                        )));
                    }

                    // Keys are migrated on a copy; an in-place change to a
                    // container key still moves the entry.
                    let mut migrated_key = existing_key.clone();
                    let new_key =
                        match self.migrate_nested_value(storage_key, storage_map_key, &mut migrated_key)? {
                            Some(replacement) => Some(replacement),
                            None if migrated_key != existing_key => Some(migrated_key),
                            None => None,
                        };

                    let existing_value = dictionary.get_mut(&existing_key).ok_or_else(|| {
                        MigrationError::Invariant(format!(
                            "dictionary key {existing_key} vanished during migration"
                        ))
                    })?;
                    let new_value =
                        self.migrate_nested_value(storage_key, storage_map_key, existing_value)?;

                    if new_key.is_none() && new_value.is_none() {
                        continue;
                    }

                    let (key_to_set, removed_value) = match new_key {
                        Some(key) => {
                            // relocating onto a live entry would drop its value
                            if key != existing_key && dictionary.contains_key(&key) {
                                return Err(MigrationError::Invariant(format!(
                                    "dictionary key {existing_key} migrated onto existing key {key}"
                                )));
                            }
                            let removed = dictionary.remove_key(&existing_key);
                            (key, removed)
                        }
                        None => (existing_key, None),
                    };
                    let value_to_set = new_value.or(removed_value).ok_or_else(|| {
                        MigrationError::Invariant(format!(
                            "dictionary value under {key_to_set} vanished during migration"
                        ))
                    })?;

                    dictionary.set_key(key_to_set, Value::some(value_to_set))?;
                }
                Ok(None)
            }

            leaf => self.migrate_leaf(storage_key, storage_map_key, leaf),
        }
    }

    fn migrate_leaf(
        &mut self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        value: &Value,
    ) -> Result<Option<Value>> {
        self.stats.leaves_visited += 1;

        let mut replacement: Option<Value> = None;
        for migration in self.migrations {
            let current = replacement.as_ref().unwrap_or(value);
            match migration.migrate(storage_key, storage_map_key, current) {
                Ok(Some(converted)) => {
                    trace!(
                        %storage_key,
                        %storage_map_key,
                        migration = migration.name(),
                        "leaf migrated"
                    );
                    self.reporter
                        .migrated(storage_key, storage_map_key, migration.name());
                    self.stats.migrated += 1;
                    replacement = Some(converted);
                }
                Ok(None) => {}
                Err(error) if error.is_fatal() => {
                    return Err(MigrationError::Fatal {
                        storage_key: *storage_key,
                        storage_map_key: storage_map_key.clone(),
                        migration: migration.name().to_string(),
                        source: error,
                    });
                }
                Err(error) => {
                    warn!(
                        %storage_key,
                        %storage_map_key,
                        migration = migration.name(),
                        %error,
                        "leaf migration failed, keeping original"
                    );
                    self.reporter
                        .error(storage_key, storage_map_key, migration.name(), &error);
                    self.stats.errors += 1;
                }
            }
        }

        Ok(replacement)
    }
}

/// Field snapshotted before traversal; its absence is a structural violation
fn field_slot<'v>(composite: &'v mut CompositeValue, field_name: &str) -> Result<&'v mut Value> {
    composite.get_field_mut(field_name).ok_or_else(|| {
        MigrationError::Invariant(format!(
            "composite field {field_name} vanished during migration"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueMigrationError;
    use crate::reporter::{CollectingReporter, ReportEntry};
    use mig_types::{Address, PrimitiveStaticType, StaticType};
    use mig_values::{ArrayValue, CompositeValue, DictionaryValue, PathDomain};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Replaces `Int(from)` with `Int(to)`
    struct Remap {
        name: &'static str,
        from: i64,
        to: i64,
    }

    impl Migration for Remap {
        fn name(&self) -> &str {
            self.name
        }

        fn migrate(
            &self,
            _: &StorageKey,
            _: &StorageMapKey,
            value: &Value,
        ) -> std::result::Result<Option<Value>, ValueMigrationError> {
            Ok(match value {
                Value::Int(i) if *i == self.from => Some(Value::Int(self.to)),
                _ => None,
            })
        }
    }

    /// Fails on every `String` leaf
    struct RejectStrings {
        fatal: bool,
    }

    impl Migration for RejectStrings {
        fn name(&self) -> &str {
            "RejectStrings"
        }

        fn migrate(
            &self,
            _: &StorageKey,
            _: &StorageMapKey,
            value: &Value,
        ) -> std::result::Result<Option<Value>, ValueMigrationError> {
            match value {
                Value::String(s) if self.fatal => Err(ValueMigrationError::Unreachable(s.clone())),
                Value::String(s) => Err(ValueMigrationError::Failed(s.clone())),
                _ => Ok(None),
            }
        }
    }

    fn remap(name: &'static str, from: i64, to: i64) -> Box<dyn Migration> {
        Box::new(Remap { name, from, to })
    }

    fn keys() -> (StorageKey, StorageMapKey) {
        (
            StorageKey::new(Address::from_u64(1), PathDomain::Storage),
            StorageMapKey::from("foo"),
        )
    }

    fn int_type() -> StaticType {
        PrimitiveStaticType::Int.into()
    }

    fn run(
        migrations: &[Box<dyn Migration>],
        value: &mut Value,
    ) -> (Result<Option<Value>>, CollectingReporter) {
        let (storage_key, storage_map_key) = keys();
        let mut reporter = CollectingReporter::new();
        let result = ValueMigrator::new(migrations, &mut reporter)
            .migrate_nested_value(&storage_key, &storage_map_key, value);
        (result, reporter)
    }

    #[test]
    fn leaf_without_applicable_migration_is_unchanged() {
        let mut value = Value::Int(7);
        let (result, reporter) = run(&[remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), None);
        assert!(reporter.entries().is_empty());
    }

    #[test]
    fn migrations_chain_on_the_same_leaf() {
        let mut value = Value::Int(1);
        let (result, reporter) = run(&[remap("A", 1, 2), remap("B", 2, 3)], &mut value);
        assert_eq!(result.unwrap(), Some(Value::Int(3)));
        assert_eq!(reporter.migrated_names(), vec!["A", "B"]);
    }

    #[test]
    fn chaining_respects_order() {
        let mut value = Value::Int(1);
        let (result, reporter) = run(&[remap("B", 2, 3), remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), Some(Value::Int(2)));
        assert_eq!(reporter.migrated_names(), vec!["A"]);
    }

    #[test]
    fn optional_rewraps_changed_inner_value() {
        let mut value = Value::some(Value::Int(1));
        let (result, _) = run(&[remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), Some(Value::some(Value::Int(2))));
    }

    #[test]
    fn array_elements_are_written_back_in_place() {
        let mut value = Value::Array(ArrayValue::new(
            StaticType::variable_sized(int_type()),
            vec![Value::Int(1), Value::Int(5), Value::some(Value::Int(1))],
        ));
        let Value::Array(array) = &value else { unreachable!() };
        let id = array.id();

        let (result, reporter) = run(&[remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), None);
        assert_eq!(reporter.migrated_names(), vec!["A", "A"]);

        let Value::Array(array) = &value else { unreachable!() };
        assert_eq!(array.id(), id);
        assert_eq!(
            array.iter().cloned().collect::<Vec<_>>(),
            vec![Value::Int(2), Value::Int(5), Value::some(Value::Int(2))]
        );
    }

    #[test]
    fn composite_fields_are_written_back_in_place() {
        let mut value = Value::Composite(CompositeValue::new(
            None,
            "S",
            [
                ("a".to_string(), Value::Int(1)),
                ("b".to_string(), Value::Int(9)),
            ],
        ));
        let (result, _) = run(&[remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), None);

        let Value::Composite(composite) = &value else { unreachable!() };
        assert_eq!(composite.field_count(), 2);
        assert_eq!(composite.get_field("a"), Some(&Value::Int(2)));
        assert_eq!(composite.get_field("b"), Some(&Value::Int(9)));
    }

    #[test]
    fn dictionary_key_is_relocated() {
        let mut value = Value::Dictionary(DictionaryValue::new(
            StaticType::dictionary(int_type(), PrimitiveStaticType::String.into()),
            [
                (Value::Int(1), Value::string("v1")),
                (Value::Int(7), Value::string("v7")),
            ],
        ));
        let (result, reporter) = run(&[remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), None);
        assert_eq!(reporter.migrated_names(), vec!["A"]);

        let Value::Dictionary(dictionary) = &value else { unreachable!() };
        assert_eq!(dictionary.count(), 2);
        assert!(!dictionary.contains_key(&Value::Int(1)));
        assert_eq!(dictionary.get(&Value::Int(2)), Some(&Value::string("v1")));
        assert_eq!(dictionary.get(&Value::Int(7)), Some(&Value::string("v7")));
    }

    #[test]
    fn dictionary_key_relocated_onto_existing_key_is_an_invariant_violation() {
        let mut value = Value::Dictionary(DictionaryValue::new(
            StaticType::dictionary(int_type(), PrimitiveStaticType::String.into()),
            [
                (Value::Int(1), Value::string("v1")),
                (Value::Int(2), Value::string("v2")),
            ],
        ));
        let (result, _) = run(&[remap("A", 1, 2)], &mut value);
        let Err(MigrationError::Invariant(message)) = result else {
            panic!("expected invariant violation");
        };
        assert_eq!(message, "dictionary key 1 migrated onto existing key 2");

        // nothing was dropped
        let Value::Dictionary(dictionary) = &value else { unreachable!() };
        assert_eq!(dictionary.count(), 2);
        assert_eq!(dictionary.get(&Value::Int(1)), Some(&Value::string("v1")));
        assert_eq!(dictionary.get(&Value::Int(2)), Some(&Value::string("v2")));
    }

    #[test]
    fn missing_composite_field_is_an_invariant_violation() {
        let mut composite = CompositeValue::new(None, "S", [("a".to_string(), Value::Int(1))]);
        assert!(field_slot(&mut composite, "a").is_ok());
        assert!(matches!(
            field_slot(&mut composite, "gone"),
            Err(MigrationError::Invariant(message)) if message.contains("gone")
        ));
    }

    #[test]
    fn dictionary_key_and_value_migrate_independently() {
        let mut value = Value::Dictionary(DictionaryValue::new(
            StaticType::dictionary(int_type(), int_type()),
            [(Value::Int(1), Value::Int(1))],
        ));
        let (result, reporter) = run(&[remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), None);
        assert_eq!(reporter.migrated_names(), vec!["A", "A"]);

        let Value::Dictionary(dictionary) = &value else { unreachable!() };
        assert_eq!(dictionary.iter().count(), 1);
        assert_eq!(dictionary.get(&Value::Int(2)), Some(&Value::Int(2)));
    }

    #[test]
    fn dictionary_value_only_change_keeps_key() {
        let mut value = Value::Dictionary(DictionaryValue::new(
            StaticType::dictionary(PrimitiveStaticType::String.into(), int_type()),
            [(Value::string("k"), Value::Int(1))],
        ));
        let (result, _) = run(&[remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), None);

        let Value::Dictionary(dictionary) = &value else { unreachable!() };
        assert_eq!(dictionary.get(&Value::string("k")), Some(&Value::Int(2)));
    }

    #[test]
    fn dictionary_of_optionals_keeps_inner_optional() {
        let mut value = Value::Dictionary(DictionaryValue::new(
            StaticType::dictionary(
                PrimitiveStaticType::String.into(),
                StaticType::optional(int_type()),
            ),
            [(Value::string("k"), Value::some(Value::Int(1)))],
        ));
        let (result, _) = run(&[remap("A", 1, 2)], &mut value);
        assert_eq!(result.unwrap(), None);

        let Value::Dictionary(dictionary) = &value else { unreachable!() };
        assert_eq!(
            dictionary.get(&Value::string("k")),
            Some(&Value::some(Value::Int(2)))
        );
    }

    #[test]
    fn recoverable_error_keeps_leaf_and_continues() {
        let mut value = Value::Array(ArrayValue::new(
            StaticType::variable_sized(PrimitiveStaticType::AnyStruct.into()),
            vec![Value::string("bad"), Value::Int(1)],
        ));
        let migrations: Vec<Box<dyn Migration>> =
            vec![Box::new(RejectStrings { fatal: false }), remap("A", 1, 2)];
        let (result, reporter) = run(&migrations, &mut value);
        assert_eq!(result.unwrap(), None);

        let Value::Array(array) = &value else { unreachable!() };
        assert_eq!(array.get(0), Some(&Value::string("bad")));
        assert_eq!(array.get(1), Some(&Value::Int(2)));

        assert_eq!(reporter.entries().len(), 2);
        assert!(matches!(
            &reporter.entries()[0],
            ReportEntry::Error { migration, .. } if migration == "RejectStrings"
        ));
    }

    #[test]
    fn fatal_error_aborts() {
        let mut value = Value::some(Value::string("bad"));
        let migrations: Vec<Box<dyn Migration>> = vec![Box::new(RejectStrings { fatal: true })];
        let (result, reporter) = run(&migrations, &mut value);
        assert!(matches!(
            result,
            Err(MigrationError::Fatal { ref migration, .. }) if migration == "RejectStrings"
        ));
        assert!(reporter.entries().is_empty());
    }

    #[test]
    fn stats_count_leaves_and_reports() {
        let (storage_key, storage_map_key) = keys();
        let migrations: Vec<Box<dyn Migration>> =
            vec![Box::new(RejectStrings { fatal: false }), remap("A", 1, 2)];
        let mut value = Value::Array(ArrayValue::new(
            StaticType::variable_sized(PrimitiveStaticType::AnyStruct.into()),
            vec![Value::string("x"), Value::Int(1), Value::Bool(true)],
        ));
        let mut reporter = CollectingReporter::new();
        let mut migrator = ValueMigrator::new(&migrations, &mut reporter);
        migrator
            .migrate_nested_value(&storage_key, &storage_map_key, &mut value)
            .unwrap();
        assert_eq!(
            migrator.stats(),
            TraversalStats {
                leaves_visited: 3,
                migrated: 1,
                errors: 1,
            }
        );
    }

    proptest! {
        #[test]
        fn prop_containers_keep_identity_and_shape(ints in proptest::collection::vec(0i64..4, 0..12)) {
            let mut value = Value::Array(ArrayValue::new(
                StaticType::variable_sized(int_type()),
                ints.iter().copied().map(Value::Int).collect(),
            ));
            let Value::Array(before) = &value else { unreachable!() };
            let id = before.id();

            let (result, reporter) = run(&[remap("A", 1, 2)], &mut value);
            prop_assert_eq!(result.unwrap(), None);

            let Value::Array(after) = &value else { unreachable!() };
            prop_assert_eq!(after.id(), id);
            prop_assert_eq!(after.count(), ints.len());
            prop_assert_eq!(reporter.entries().len(), ints.iter().filter(|i| **i == 1).count());
            prop_assert!(after.iter().all(|v| *v != Value::Int(1)));
        }
    }
}
