use levy_primitives::Address;

/// Returns a random address.
pub fn random_address() -> Address {
    Address::from(rand::random::<[u8; 20]>())
}
