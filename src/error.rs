use core::fmt;


/// The error type returned by every fallible operation in this crate.
///
/// Decapsulation mismatch is deliberately **not** represented here: per FIPS 203,
/// a ciphertext that fails the internal re-encryption check still yields a valid
/// (pseudorandom, unforgeable) shared secret rather than an error, so that callers
/// cannot distinguish rejection from success by return shape or timing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// An unknown or unsupported parameter-set name was supplied at construction.
    InvalidParameter(&'static str),
    /// The system random number generator returned short, or failed outright.
    EntropyFailure,
    /// An encapsulation key, decapsulation key, or ciphertext failed a length or
    /// modulus-range check before any cryptographic work was attempted.
    MalformedInput(&'static str),
}


impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Error::EntropyFailure => write!(f, "random number generator failed"),
            Error::MalformedInput(msg) => write!(f, "malformed input: {msg}"),
        }
    }
}


#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for Error {}


/// If the condition is not met, return `Err(Error::MalformedInput(msg))`. Borrowed in
/// spirit from the `anyhow` crate's `ensure!`, specialized to this crate's error type.
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::error::Error::MalformedInput($msg));
        }
    };
}

pub(crate) use ensure; // make available throughout crate


#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_messages_are_distinct() {
        let a = Error::InvalidParameter("bad name");
        let b = Error::EntropyFailure;
        let c = Error::MalformedInput("short ek");
        assert_ne!(a, c);
        assert_ne!(format!("{a}"), format!("{b}"));
        assert_ne!(format!("{b}"), format!("{c}"));
    }
}
