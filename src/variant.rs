//! Runtime parameter-set selection over the three compile-time `ml_kem_*` modules.
//!
//! The const-generic engine in [`crate::ml_kem_512`]/[`crate::ml_kem_768`]/
//! [`crate::ml_kem_1024`] stays the primary, zero-overhead API. [`Variant`] is a thin
//! convenience layer for callers that only learn which parameter set to use at
//! runtime (e.g. from a negotiated profile string) and are willing to pay for a heap
//! allocation per key/ciphertext in exchange for not matching on an enum themselves.

use alloc::vec::Vec;
use rand_core::CryptoRngCore;

use crate::error::Error;
use crate::traits::{Decaps, Encaps, KeyGen, SerDes};

/// One of the three fixed FIPS 203 parameter sets, selected by name at runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    /// Category 1 parameter set (`k = 2`).
    MlKem512,
    /// Category 3 parameter set (`k = 3`).
    MlKem768,
    /// Category 5 parameter set (`k = 4`).
    MlKem1024,
}

impl Variant {
    /// Resolves a canonical FIPS 203 name (`"ML-KEM-512"`, case-insensitively) to a
    /// variant.
    /// # Errors
    /// Returns [`Error::InvalidParameter`] for any other string.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name.to_ascii_uppercase().as_str() {
            "ML-KEM-512" => Ok(Variant::MlKem512),
            "ML-KEM-768" => Ok(Variant::MlKem768),
            "ML-KEM-1024" => Ok(Variant::MlKem1024),
            _ => Err(Error::InvalidParameter("unrecognized ML-KEM variant name")),
        }
    }

    /// The canonical FIPS 203 name for this variant.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Variant::MlKem512 => "ML-KEM-512",
            Variant::MlKem768 => "ML-KEM-768",
            Variant::MlKem1024 => "ML-KEM-1024",
        }
    }

    /// Generates a fresh keypair for this variant using the OS RNG.
    /// # Errors
    /// See [`Self::try_keygen_with_rng`].
    #[cfg(feature = "default-rng")]
    pub fn try_keygen(self) -> Result<(Vec<u8>, Vec<u8>), Error> {
        self.try_keygen_with_rng(&mut rand_core::OsRng)
    }

    /// Generates a fresh keypair for this variant, returning owned `(ek, dk)` byte
    /// vectors rather than the fixed-size arrays the const-generic API uses, since
    /// their length is only known at runtime through `self`.
    /// # Errors
    /// Returns [`Error::EntropyFailure`] if the RNG fails, or
    /// [`Error::InvalidParameter`] if the matching Cargo feature was not compiled in.
    pub fn try_keygen_with_rng(
        self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Vec<u8>, Vec<u8>), Error> {
        match self {
            #[cfg(feature = "ml-kem-512")]
            Variant::MlKem512 => {
                let (ek, dk) = crate::ml_kem_512::KG::try_keygen_with_rng(rng)?;
                Ok((ek.into_bytes().to_vec(), dk.into_bytes().to_vec()))
            }
            #[cfg(feature = "ml-kem-768")]
            Variant::MlKem768 => {
                let (ek, dk) = crate::ml_kem_768::KG::try_keygen_with_rng(rng)?;
                Ok((ek.into_bytes().to_vec(), dk.into_bytes().to_vec()))
            }
            #[cfg(feature = "ml-kem-1024")]
            Variant::MlKem1024 => {
                let (ek, dk) = crate::ml_kem_1024::KG::try_keygen_with_rng(rng)?;
                Ok((ek.into_bytes().to_vec(), dk.into_bytes().to_vec()))
            }
            #[allow(unreachable_patterns)]
            _ => Err(Error::InvalidParameter(
                "parameter set not compiled in; enable its Cargo feature",
            )),
        }
    }

    /// Encapsulates against a serialized encapsulation key, returning `(shared secret, ciphertext)`.
    /// # Errors
    /// Returns [`Error::MalformedInput`] if `ek` is not this variant's exact length or
    /// fails the FIPS 203 modulus check, [`Error::EntropyFailure`] if the RNG fails, or
    /// [`Error::InvalidParameter`] if the matching Cargo feature was not compiled in.
    pub fn try_encaps_with_rng(
        self, rng: &mut impl CryptoRngCore, ek: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), Error> {
        match self {
            #[cfg(feature = "ml-kem-512")]
            Variant::MlKem512 => {
                let ek: [u8; crate::ml_kem_512::EK_LEN] =
                    ek.try_into().map_err(|_| Error::MalformedInput("wrong ek length for ML-KEM-512"))?;
                let ek = crate::ml_kem_512::EncapsKey::try_from_bytes(ek)?;
                let (ssk, ct) = ek.try_encaps_with_rng(rng)?;
                Ok((ssk.into_bytes().to_vec(), ct.into_bytes().to_vec()))
            }
            #[cfg(feature = "ml-kem-768")]
            Variant::MlKem768 => {
                let ek: [u8; crate::ml_kem_768::EK_LEN] =
                    ek.try_into().map_err(|_| Error::MalformedInput("wrong ek length for ML-KEM-768"))?;
                let ek = crate::ml_kem_768::EncapsKey::try_from_bytes(ek)?;
                let (ssk, ct) = ek.try_encaps_with_rng(rng)?;
                Ok((ssk.into_bytes().to_vec(), ct.into_bytes().to_vec()))
            }
            #[cfg(feature = "ml-kem-1024")]
            Variant::MlKem1024 => {
                let ek: [u8; crate::ml_kem_1024::EK_LEN] =
                    ek.try_into().map_err(|_| Error::MalformedInput("wrong ek length for ML-KEM-1024"))?;
                let ek = crate::ml_kem_1024::EncapsKey::try_from_bytes(ek)?;
                let (ssk, ct) = ek.try_encaps_with_rng(rng)?;
                Ok((ssk.into_bytes().to_vec(), ct.into_bytes().to_vec()))
            }
            #[allow(unreachable_patterns)]
            _ => Err(Error::InvalidParameter(
                "parameter set not compiled in; enable its Cargo feature",
            )),
        }
    }

    /// Decapsulates a ciphertext against a serialized decapsulation key.
    /// # Errors
    /// Returns [`Error::MalformedInput`] if `dk`/`ct` are not this variant's exact
    /// lengths, or [`Error::InvalidParameter`] if the matching Cargo feature was not
    /// compiled in. Per FIPS 203, a ciphertext that fails the internal re-encryption
    /// check does not surface as an error here either — it still yields a
    /// (pseudorandom) shared secret, consistent with [`crate::Error`]'s documented
    /// implicit-rejection behavior.
    pub fn try_decaps(self, dk: &[u8], ct: &[u8]) -> Result<Vec<u8>, Error> {
        match self {
            #[cfg(feature = "ml-kem-512")]
            Variant::MlKem512 => {
                let dk: [u8; crate::ml_kem_512::DK_LEN] =
                    dk.try_into().map_err(|_| Error::MalformedInput("wrong dk length for ML-KEM-512"))?;
                let ct: [u8; crate::ml_kem_512::CT_LEN] =
                    ct.try_into().map_err(|_| Error::MalformedInput("wrong ct length for ML-KEM-512"))?;
                let dk = crate::ml_kem_512::DecapsKey::try_from_bytes(dk)?;
                let ct = crate::ml_kem_512::CipherText::try_from_bytes(ct)?;
                Ok(dk.try_decaps(&ct)?.into_bytes().to_vec())
            }
            #[cfg(feature = "ml-kem-768")]
            Variant::MlKem768 => {
                let dk: [u8; crate::ml_kem_768::DK_LEN] =
                    dk.try_into().map_err(|_| Error::MalformedInput("wrong dk length for ML-KEM-768"))?;
                let ct: [u8; crate::ml_kem_768::CT_LEN] =
                    ct.try_into().map_err(|_| Error::MalformedInput("wrong ct length for ML-KEM-768"))?;
                let dk = crate::ml_kem_768::DecapsKey::try_from_bytes(dk)?;
                let ct = crate::ml_kem_768::CipherText::try_from_bytes(ct)?;
                Ok(dk.try_decaps(&ct)?.into_bytes().to_vec())
            }
            #[cfg(feature = "ml-kem-1024")]
            Variant::MlKem1024 => {
                let dk: [u8; crate::ml_kem_1024::DK_LEN] =
                    dk.try_into().map_err(|_| Error::MalformedInput("wrong dk length for ML-KEM-1024"))?;
                let ct: [u8; crate::ml_kem_1024::CT_LEN] =
                    ct.try_into().map_err(|_| Error::MalformedInput("wrong ct length for ML-KEM-1024"))?;
                let dk = crate::ml_kem_1024::DecapsKey::try_from_bytes(dk)?;
                let ct = crate::ml_kem_1024::CipherText::try_from_bytes(ct)?;
                Ok(dk.try_decaps(&ct)?.into_bytes().to_vec())
            }
            #[allow(unreachable_patterns)]
            _ => Err(Error::InvalidParameter(
                "parameter set not compiled in; enable its Cargo feature",
            )),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::Variant;
    use rand_core::SeedableRng;

    #[test]
    fn from_name_accepts_canonical_and_rejects_unknown() {
        assert_eq!(Variant::from_name("ML-KEM-512").unwrap(), Variant::MlKem512);
        assert_eq!(Variant::from_name("ml-kem-768").unwrap(), Variant::MlKem768);
        assert_eq!(Variant::from_name("ML-KEM-1024").unwrap(), Variant::MlKem1024);
        assert!(Variant::from_name("ML-KEM-2048").is_err());
    }

    #[test]
    fn roundtrip_via_facade() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        for v in [Variant::MlKem512, Variant::MlKem768, Variant::MlKem1024] {
            let (ek, dk) = v.try_keygen_with_rng(&mut rng).unwrap();
            let (ssk1, ct) = v.try_encaps_with_rng(&mut rng, &ek).unwrap();
            let ssk2 = v.try_decaps(&dk, &ct).unwrap();
            assert_eq!(ssk1, ssk2);
        }
    }
}
