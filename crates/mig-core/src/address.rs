//! Account address iteration

use mig_types::Address;

/// Yields the accounts to migrate
///
/// Each account is yielded exactly once; [`Address::ZERO`] signals the end.
pub trait AddressIterator {
    /// Next account, or [`Address::ZERO`] when exhausted
    fn next_address(&mut self) -> Address;
}

/// Iterates a fixed list of addresses
#[derive(Debug, Clone, Default)]
pub struct AddressSliceIterator {
    addresses: Vec<Address>,
    position: usize,
}

impl AddressSliceIterator {
    /// Create iterator over `addresses`
    #[must_use]
    pub fn new(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self {
            addresses: addresses.into_iter().collect(),
            position: 0,
        }
    }

    /// Addresses not yet yielded
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.addresses.len().saturating_sub(self.position)
    }
}

impl AddressIterator for AddressSliceIterator {
    fn next_address(&mut self) -> Address {
        match self.addresses.get(self.position) {
            Some(address) => {
                self.position += 1;
                *address
            }
            None => Address::ZERO,
        }
    }
}
