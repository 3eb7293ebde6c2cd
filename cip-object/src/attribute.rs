//! Attribute descriptors and the per-object attribute registry

use cip_core::{CipDataType, CipError, CipResult};
use std::collections::BTreeMap;

/// Attribute capability set
///
/// Fixed when the attribute is registered and never mutated afterwards.
/// This replaces the bit-indexed capability arrays of older stacks with
/// an explicit mapping that can be validated at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeCapability {
    /// Readable through Get Attribute Single only
    GetableSingle,
    /// Readable through Get Attribute All only
    GetableAll,
    /// Readable through both get services
    GetableSingleAndAll,
    /// Writable only
    Setable,
    /// Writable and readable through both get services
    SetAndGetable,
    /// Registered but reachable by no service
    NotAccessible,
}

impl AttributeCapability {
    /// Check if Get Attribute Single may read this attribute
    pub fn is_gettable_single(&self) -> bool {
        matches!(
            self,
            AttributeCapability::GetableSingle
                | AttributeCapability::GetableSingleAndAll
                | AttributeCapability::SetAndGetable
        )
    }

    /// Check if Get Attribute All includes this attribute
    pub fn is_gettable_all(&self) -> bool {
        matches!(
            self,
            AttributeCapability::GetableAll
                | AttributeCapability::GetableSingleAndAll
                | AttributeCapability::SetAndGetable
        )
    }

    /// Check if Set Attribute Single may write this attribute
    pub fn is_settable(&self) -> bool {
        matches!(
            self,
            AttributeCapability::Setable | AttributeCapability::SetAndGetable
        )
    }
}

/// A single registered attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeEntry {
    /// Attribute number (> 0, unique within the object)
    pub id: u16,
    /// Declared data type; `Opaque` for attributes with a custom codec
    pub data_type: CipDataType,
    /// Capability set, immutable after registration
    pub capability: AttributeCapability,
}

impl AttributeEntry {
    /// Create a new attribute entry
    pub fn new(id: u16, data_type: CipDataType, capability: AttributeCapability) -> Self {
        Self {
            id,
            data_type,
            capability,
        }
    }
}

/// Registry of an object's attributes, ordered by attribute number
///
/// Attribute numbers are dense but may have gaps; the registry keeps
/// them sorted so Get Attribute All can walk them in ascending order.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    entries: BTreeMap<u16, AttributeEntry>,
}

impl AttributeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register an attribute
    ///
    /// # Errors
    /// Returns an error if the attribute number is zero or already taken.
    pub fn register(&mut self, entry: AttributeEntry) -> CipResult<()> {
        if entry.id == 0 {
            return Err(CipError::InvalidData(
                "Attribute number 0 is reserved".to_string(),
            ));
        }
        if self.entries.contains_key(&entry.id) {
            return Err(CipError::InvalidData(format!(
                "Attribute {} is already registered",
                entry.id
            )));
        }
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    /// Look up an attribute by number
    pub fn get(&self, attribute_id: u16) -> Option<&AttributeEntry> {
        self.entries.get(&attribute_id)
    }

    /// Highest registered attribute number (0 when empty)
    pub fn highest_attribute_id(&self) -> u16 {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of registered attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate all entries in ascending attribute-number order
    pub fn iter(&self) -> impl Iterator<Item = &AttributeEntry> {
        self.entries.values()
    }

    /// Iterate the entries Get Attribute All must serialize, ascending
    pub fn iter_gettable_all(&self) -> impl Iterator<Item = &AttributeEntry> {
        self.entries
            .values()
            .filter(|entry| entry.capability.is_gettable_all())
    }

    /// Resolve an attribute for a get service, enforcing capability
    ///
    /// # Errors
    /// `AttributeNotSupported` when the number is zero, unknown or above
    /// the highest registered number; `AttributeNotGettable` when the
    /// capability bit for the requested get flavor is absent.
    pub fn check_gettable(&self, attribute_id: u16, get_all: bool) -> CipResult<&AttributeEntry> {
        let entry = self.check_exists(attribute_id)?;
        let allowed = if get_all {
            entry.capability.is_gettable_all()
        } else {
            entry.capability.is_gettable_single()
        };
        if !allowed {
            return Err(CipError::AttributeNotGettable(attribute_id));
        }
        Ok(entry)
    }

    /// Resolve an attribute for the set service, enforcing capability
    pub fn check_settable(&self, attribute_id: u16) -> CipResult<&AttributeEntry> {
        let entry = self.check_exists(attribute_id)?;
        if !entry.capability.is_settable() {
            return Err(CipError::AttributeNotSetable(attribute_id));
        }
        Ok(entry)
    }

    fn check_exists(&self, attribute_id: u16) -> CipResult<&AttributeEntry> {
        if attribute_id == 0 || attribute_id > self.highest_attribute_id() {
            return Err(CipError::AttributeNotSupported(attribute_id));
        }
        self.entries
            .get(&attribute_id)
            .ok_or(CipError::AttributeNotSupported(attribute_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> AttributeRegistry {
        let mut registry = AttributeRegistry::new();
        registry
            .register(AttributeEntry::new(
                1,
                CipDataType::Uint,
                AttributeCapability::GetableSingleAndAll,
            ))
            .unwrap();
        registry
            .register(AttributeEntry::new(
                5,
                CipDataType::Real,
                AttributeCapability::SetAndGetable,
            ))
            .unwrap();
        registry
            .register(AttributeEntry::new(
                6,
                CipDataType::Uint,
                AttributeCapability::Setable,
            ))
            .unwrap();
        registry
    }

    #[test]
    fn test_register_validation() {
        let mut registry = sample_registry();
        let duplicate = AttributeEntry::new(
            5,
            CipDataType::Real,
            AttributeCapability::GetableSingle,
        );
        assert!(registry.register(duplicate).is_err());

        let zero = AttributeEntry::new(0, CipDataType::Uint, AttributeCapability::GetableSingle);
        assert!(registry.register(zero).is_err());
    }

    #[test]
    fn test_highest_attribute_id() {
        assert_eq!(sample_registry().highest_attribute_id(), 6);
        assert_eq!(AttributeRegistry::new().highest_attribute_id(), 0);
    }

    #[test]
    fn test_check_gettable() {
        let registry = sample_registry();
        assert_eq!(registry.check_gettable(1, false).unwrap().id, 1);
        assert_eq!(registry.check_gettable(5, true).unwrap().id, 5);

        // set-only attribute is denied for both get flavors
        assert!(matches!(
            registry.check_gettable(6, false),
            Err(CipError::AttributeNotGettable(6))
        ));
        assert!(matches!(
            registry.check_gettable(6, true),
            Err(CipError::AttributeNotGettable(6))
        ));
    }

    #[test]
    fn test_check_unknown_attribute() {
        let registry = sample_registry();
        // gap inside the range and number above the range
        assert!(matches!(
            registry.check_gettable(3, false),
            Err(CipError::AttributeNotSupported(3))
        ));
        assert!(matches!(
            registry.check_settable(99),
            Err(CipError::AttributeNotSupported(99))
        ));
        assert!(matches!(
            registry.check_gettable(0, false),
            Err(CipError::AttributeNotSupported(0))
        ));
    }

    #[test]
    fn test_check_settable() {
        let registry = sample_registry();
        assert!(registry.check_settable(5).is_ok());
        assert!(matches!(
            registry.check_settable(1),
            Err(CipError::AttributeNotSetable(1))
        ));
    }

    #[test]
    fn test_iter_gettable_all_is_ascending() {
        let registry = sample_registry();
        let ids: Vec<u16> = registry.iter_gettable_all().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }
}
