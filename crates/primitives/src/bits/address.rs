use crate::{utils::keccak256, wrap_fixed_bytes, FixedBytes};
use alloc::{
    borrow::Borrow,
    string::{String, ToString},
};
use core::{fmt, str};

/// Error type for address checksum validation.
#[derive(Debug, Copy, Clone)]
pub enum AddressError {
    /// Error while decoding hex.
    Hex(hex::FromHexError),

    /// Invalid ERC-55 checksum.
    InvalidChecksum,
}

impl From<hex::FromHexError> for AddressError {
    fn from(value: hex::FromHexError) -> Self {
        Self::Hex(value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AddressError {}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(err) => err.fmt(f),
            Self::InvalidChecksum => f.write_str("Bad address checksum"),
        }
    }
}

wrap_fixed_bytes!(
    /// An Ethereum address, 20 bytes in length.
    Address<20>
);

impl Borrow<[u8; 20]> for Address {
    #[inline]
    fn borrow(&self) -> &[u8; 20] {
        &self.0
    }
}

impl From<Address> for FixedBytes<32> {
    #[inline]
    fn from(addr: Address) -> Self {
        addr.into_word()
    }
}

impl Address {
    /// Creates an Ethereum address from an EVM word's upper 20 bytes.
    #[inline]
    pub fn from_word(hash: FixedBytes<32>) -> Self {
        Self(FixedBytes(hash[12..].try_into().unwrap()))
    }

    /// Left-pads the address to 32 bytes (EVM word size).
    #[inline]
    pub fn into_word(self) -> FixedBytes<32> {
        let mut buf = [0; 32];
        buf[12..].copy_from_slice(self.as_bytes());
        FixedBytes(buf)
    }

    /// Parse an Ethereum address, verifying its [EIP-55] checksum.
    ///
    /// You can optionally specify an [EIP-155 chain ID] to check the address
    /// using [EIP-1191].
    ///
    /// # Errors
    ///
    /// If the provided string does not match the expected checksum.
    ///
    /// [EIP-55]: https://eips.ethereum.org/EIPS/eip-55
    /// [EIP-155 chain ID]: https://eips.ethereum.org/EIPS/eip-155
    /// [EIP-1191]: https://eips.ethereum.org/EIPS/eip-1191
    pub fn parse_checksummed<S: AsRef<str>>(
        s: S,
        chain_id: Option<u64>,
    ) -> Result<Self, AddressError> {
        fn inner(s: &str, chain_id: Option<u64>) -> Result<Address, AddressError> {
            if !s.starts_with("0x") {
                return Err(AddressError::Hex(hex::FromHexError::InvalidStringLength))
            }

            let address: Address = s.parse()?;
            let buf = &mut [0; 42];
            let ss = address.to_checksum_raw(buf, chain_id);
            if s == ss {
                Ok(address)
            } else {
                Err(AddressError::InvalidChecksum)
            }
        }

        inner(s.as_ref(), chain_id)
    }

    /// Encodes an Ethereum address to its [EIP-55] checksum.
    ///
    /// You can optionally specify an [EIP-155 chain ID] to encode the address
    /// using [EIP-1191].
    ///
    /// # Panics
    ///
    /// If `addr_buf` is not 42 bytes long.
    ///
    /// [EIP-55]: https://eips.ethereum.org/EIPS/eip-55
    /// [EIP-155 chain ID]: https://eips.ethereum.org/EIPS/eip-155
    /// [EIP-1191]: https://eips.ethereum.org/EIPS/eip-1191
    pub fn to_checksum_raw<'a>(&self, addr_buf: &'a mut [u8], chain_id: Option<u64>) -> &'a str {
        assert_eq!(addr_buf.len(), 42, "addr_buf must be 42 bytes long");
        addr_buf[0] = b'0';
        addr_buf[1] = b'x';
        hex::encode_to_slice(self.as_bytes(), &mut addr_buf[2..]).unwrap();

        let mut storage;
        let to_hash = match chain_id {
            Some(chain_id) => {
                let prefix_str = chain_id.to_string();
                let prefix_len = prefix_str.len();
                debug_assert!(prefix_len <= 20);
                let len = prefix_len + 42;

                // A decimal `u64` string is at most 20 bytes long: round up 20 + 42 to 64.
                storage = [0u8; 64];
                storage[..prefix_len].copy_from_slice(prefix_str.as_bytes());
                storage[prefix_len..len].copy_from_slice(addr_buf);
                &storage[..len]
            }
            None => &addr_buf[2..],
        };
        let hash = keccak256(to_hash);
        let mut hash_hex = [0u8; 64];
        hex::encode_to_slice(hash.as_bytes(), &mut hash_hex).unwrap();

        // generates significantly less code than zipping the two arrays, or
        // `.into_iter()`
        for (i, x) in hash_hex.iter().enumerate().take(40) {
            if *x >= b'8' {
                // SAFETY: `addr_buf` is 42 bytes long, `2..42` is always in range
                unsafe { addr_buf.get_unchecked_mut(i + 2).make_ascii_uppercase() };
            }
        }

        // SAFETY: All bytes in the buffer are valid UTF-8
        unsafe { str::from_utf8_unchecked(addr_buf) }
    }

    /// Encodes an Ethereum address to its [EIP-55] checksum.
    ///
    /// You can optionally specify an [EIP-155 chain ID] to encode the address
    /// using [EIP-1191].
    ///
    /// [EIP-55]: https://eips.ethereum.org/EIPS/eip-55
    /// [EIP-155 chain ID]: https://eips.ethereum.org/EIPS/eip-155
    /// [EIP-1191]: https://eips.ethereum.org/EIPS/eip-1191
    pub fn to_checksum(&self, chain_id: Option<u64>) -> String {
        let mut buf = [0u8; 42];
        self.to_checksum_raw(&mut buf, chain_id).to_string()
    }

    /// Returns the `CREATE2` address of a smart contract as specified in
    /// [EIP1014](https://github.com/ethereum/EIPs/blob/master/EIPS/eip-1014.md):
    ///
    /// `keccak256(0xff ++ address ++ salt ++ keccak256(init_code))[12:]`
    pub fn create2_from_code<A, S, C>(address: A, salt: S, init_code: C) -> Address
    where
        A: Borrow<[u8; 20]>,
        S: Borrow<[u8; 32]>,
        C: AsRef<[u8]>,
    {
        Self::create2(address, salt, keccak256(init_code.as_ref()).0)
    }

    /// Returns the `CREATE2` address of a smart contract as specified in
    /// [EIP1014](https://eips.ethereum.org/EIPS/eip-1014),
    /// taking the pre-computed hash of the init code as input:
    ///
    /// `keccak256(0xff ++ address ++ salt ++ init_code_hash)[12:]`
    pub fn create2<A, S, H>(address: A, salt: S, init_code_hash: H) -> Address
    where
        // not `AsRef` because `[u8; N]` does not implement `AsRef<[u8; N]>`
        A: Borrow<[u8; 20]>,
        S: Borrow<[u8; 32]>,
        H: Borrow<[u8; 32]>,
    {
        fn create2_address(
            address: &[u8; 20],
            salt: &[u8; 32],
            init_code_hash: &[u8; 32],
        ) -> Address {
            let mut bytes = [0; 85];
            bytes[0] = 0xff;
            bytes[1..21].copy_from_slice(address);
            bytes[21..53].copy_from_slice(salt);
            bytes[53..85].copy_from_slice(init_code_hash);
            let hash = keccak256(bytes);
            Address::from_word(hash)
        }

        create2_address(address.borrow(), salt.borrow(), init_code_hash.borrow())
    }
}
