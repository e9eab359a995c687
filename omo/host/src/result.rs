use std::fmt::{Debug, Display};

/// Addition methods for result types.
/// Useful for testing, improving code readability.
pub trait ResultExt: Sized {
    type Success;
    type Error;

    /// Ensure the result is ok; return the value.
    fn should_succeed(self) -> Self::Success;

    /// Ensure the result is ok, and the value satisfies the given predicate.
    fn should_succeed_and<F>(self, predicate: F) -> Self::Success
    where
        Self::Success: Debug,
        F: FnOnce(&Self::Success) -> bool,
    {
        let success = self.should_succeed();
        assert!(
            predicate(&success),
            "success as expected, but value does not satisfy predicate! value: {success:?}"
        );
        success
    }

    /// Ensure the result is ok, and matches the expect value.
    fn should_succeed_and_equal<U>(self, expect: U) -> Self::Success
    where
        Self::Success: Debug + PartialEq<U>,
        U: Debug,
    {
        let success = self.should_succeed();
        assert_eq!(
            success, expect,
            "success as expected, but with different value! expecting: {expect:?}, got: {success:?}"
        );
        success
    }

    /// Ensure the result is error; return the error.
    fn should_fail(self) -> Self::Error;

    /// Ensure the result is error, and matches the specified error.
    ///
    /// We consider the errors match, if the error message contains the expect
    /// value as a substring.
    fn should_fail_with_error<U>(self, expect: U) -> Self::Error
    where
        Self::Error: Display,
        U: Display,
    {
        let error = self.should_fail();
        assert!(
            error.to_string().contains(&expect.to_string()),
            "fail as expected, but with wrong error! expecting: {expect}, got: {error}"
        );
        error
    }
}

impl<T, E> ResultExt for Result<T, E>
where
    T: Debug,
    E: Display,
{
    type Error = E;
    type Success = T;

    fn should_succeed(self) -> Self::Success {
        match self {
            Self::Ok(value) => value,
            Self::Err(err) => panic!("expecting ok, got error: {err}"),
        }
    }

    fn should_fail(self) -> Self::Error {
        match self {
            Self::Err(err) => err,
            Self::Ok(value) => panic!("expecting error, got ok: {value:?}"),
        }
    }
}
