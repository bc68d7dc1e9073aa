#![no_main]

use arbitrary::Arbitrary;
use catbuffer_codec::{
    bytes_to_uint, fit, uint_to_bytes, Decode, Encode, EncodeSize, Error, Width,
};
use catbuffer_layout::{Codec, Config, Schema};
use catbuffer_model::{
    AccountPropertiesAddressTransaction, AccountPropertiesEntityTypeTransaction,
    AccountPropertiesMosaicTransaction, AggregateTransaction, EmbeddedTransferTransaction,
    TransferTransaction, SCHEMA,
};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

const STRUCTURES: [&str; 6] = [
    "TransferTransaction",
    "EmbeddedTransferTransaction",
    "AggregateTransaction",
    "AccountPropertiesAddressTransaction",
    "AccountPropertiesMosaicTransaction",
    "AccountPropertiesEntityTypeTransaction",
];

fn schema() -> &'static Schema {
    static SCHEMA_CELL: OnceLock<Schema> = OnceLock::new();
    SCHEMA_CELL.get_or_init(|| Schema::from_yaml(SCHEMA).expect("schema must resolve"))
}

// Any input that decodes must encode back to exactly the same bytes
fn roundtrip_typed<T: Decode + Encode + PartialEq + std::fmt::Debug>(bytes: &[u8]) {
    let Ok(value) = T::decode(bytes) else {
        return;
    };
    assert_eq!(value.encode_size(), bytes.len());
    let encoded = value.encode().expect("Failed to encode a decoded value!");
    assert_eq!(&encoded[..], bytes);
    assert_eq!(T::decode(&encoded).expect("Failed to decode!"), value);
}

fn roundtrip_layout(index: u8, bytes: &[u8]) {
    let name = STRUCTURES[index as usize % STRUCTURES.len()];
    let codec = Codec::new(schema(), Config::default());
    let Ok(value) = codec.decode_root(name, bytes) else {
        return;
    };
    let encoded = codec
        .encode(name, &value)
        .expect("Failed to encode a decoded value!");
    assert_eq!(&encoded[..], bytes);
}

fn roundtrip_uint(value: u64, width: u8) {
    let width = match width % 4 {
        0 => Width::One,
        1 => Width::Two,
        2 => Width::Four,
        _ => Width::Eight,
    };
    match uint_to_bytes(value, width) {
        Ok(bytes) => {
            assert_eq!(bytes.len(), width.bytes());
            assert_eq!(bytes_to_uint(&bytes), Ok(value));
        }
        Err(Error::Overflow { .. }) => assert!(value > width.max_value()),
        Err(err) => panic!("unexpected error: {err:?}"),
    }
}

fn roundtrip_fit(bytes: &[u8], width: u8) {
    let width = width as usize;
    match fit(Some(bytes), width) {
        Ok(fitted) => {
            assert_eq!(fitted.len(), width);
            assert_eq!(&fitted[width - bytes.len()..], bytes);
            assert!(fitted[..width - bytes.len()].iter().all(|byte| *byte == 0));
        }
        Err(Error::TooLarge { len, .. }) => assert!(len > width),
        Err(err) => panic!("unexpected error: {err:?}"),
    }
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    // Typed structures
    Transfer(&'a [u8]),
    EmbeddedTransfer(&'a [u8]),
    Aggregate(&'a [u8]),
    AddressProperties(&'a [u8]),
    MosaicProperties(&'a [u8]),
    EntityTypeProperties(&'a [u8]),

    // Interpreted structures
    Layout { index: u8, bytes: &'a [u8] },

    // Scalars
    Uint { value: u64, width: u8 },
    Fit { bytes: &'a [u8], width: u8 },
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Transfer(bytes) => roundtrip_typed::<TransferTransaction>(bytes),
        FuzzInput::EmbeddedTransfer(bytes) => {
            roundtrip_typed::<EmbeddedTransferTransaction>(bytes)
        }
        FuzzInput::Aggregate(bytes) => roundtrip_typed::<AggregateTransaction>(bytes),
        FuzzInput::AddressProperties(bytes) => {
            roundtrip_typed::<AccountPropertiesAddressTransaction>(bytes)
        }
        FuzzInput::MosaicProperties(bytes) => {
            roundtrip_typed::<AccountPropertiesMosaicTransaction>(bytes)
        }
        FuzzInput::EntityTypeProperties(bytes) => {
            roundtrip_typed::<AccountPropertiesEntityTypeTransaction>(bytes)
        }
        FuzzInput::Layout { index, bytes } => roundtrip_layout(index, bytes),
        FuzzInput::Uint { value, width } => roundtrip_uint(value, width),
        FuzzInput::Fit { bytes, width } => roundtrip_fit(bytes, width),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
