use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::Key;

/// The unsigned `none` algorithm
///
/// Signs to an empty byte string. Plain verification always fails with
/// [`Error::AlgorithmNoneRejected`]; an empty signature is accepted only
/// through [`Unsigned::verify_allowed`] with the caller's opt-in.
pub struct Unsigned;

impl Unsigned {
    /// Accept an empty signature if unsigned tokens are allowed
    pub(crate) fn verify_allowed(signature: &[u8], allow_unsigned: bool) -> Result<()> {
        if !allow_unsigned {
            return Err(Error::AlgorithmNoneRejected);
        }
        if signature.is_empty() {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

impl Algorithm for Unsigned {
    fn name(&self) -> &'static str {
        "none"
    }

    fn sign(&self, _signing_input: &[u8], _key: &Key) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn verify(&self, _signing_input: &[u8], _signature: &[u8], _key: &Key) -> Result<()> {
        Err(Error::AlgorithmNoneRejected)
    }
}
