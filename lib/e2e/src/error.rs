use alloy::sol_types::SolError;

/// Extension trait to check the custom error a call reverted with.
pub trait Revert<E> {
    /// Checks that `Self` corresponds to the typed abi-encoded error
    /// `expected`.
    fn reverted_with(&self, expected: E) -> bool;
}

impl<E: SolError> Revert<E> for alloy::contract::Error {
    fn reverted_with(&self, expected: E) -> bool {
        self.as_revert_data()
            .is_some_and(|data| data.as_ref() == expected.abi_encode().as_slice())
    }
}

impl<E: SolError> Revert<E> for eyre::Report {
    fn reverted_with(&self, expected: E) -> bool {
        // Reports wrap the transport error, so the revert data only shows up
        // in its debug output.
        let err_string = format!("{self:#?}");
        let expected = alloy::hex::encode(expected.abi_encode());
        err_string.contains(&expected)
    }
}
