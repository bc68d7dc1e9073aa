use bytes::Bytes;
use catbuffer_codec::{Decode, Encode, EncodeSize, Error};
use catbuffer_model::{
    AccountPropertiesAddressTransaction, AccountPropertiesEntityTypeTransaction,
    AccountPropertiesMosaicTransaction, EmbeddedTransferTransaction, Mosaic, TransferTransaction,
};

const SIZE: [u8; 4] = [0xF2, 0x26, 0x6C, 0x06];
const SIGNATURE: [u8; 64] = [
    0xF5, 0x24, 0x8C, 0xB0, 0x05, 0x49, 0xC6, 0x15, 0xFC, 0x56, 0x13, 0x08, 0xE3, 0x4B, 0x60, 0xFF,
    0x3E, 0xE9, 0xFA, 0x15, 0xA3, 0xB6, 0x05, 0xDC, 0x0C, 0x4C, 0xF7, 0xF1, 0xB1, 0x5A, 0xAB, 0xDC,
    0xCC, 0x2E, 0x09, 0x59, 0x38, 0x97, 0xF2, 0x69, 0xD9, 0xE2, 0x56, 0x29, 0x2B, 0xF3, 0x52, 0xC0,
    0xE8, 0x34, 0x62, 0x6D, 0x00, 0x3C, 0xBF, 0xC2, 0x18, 0x0D, 0x71, 0xED, 0x25, 0x72, 0x3F, 0x48,
];
const SIGNER: [u8; 32] = [
    0x3E, 0xE9, 0xFA, 0x15, 0xA3, 0xB6, 0x05, 0xDC, 0x0C, 0x4C, 0xF7, 0xF1, 0xB1, 0x5A, 0xAB, 0xDC,
    0xE8, 0x34, 0x62, 0x6D, 0x00, 0x3C, 0xBF, 0xC2, 0x18, 0x0D, 0x71, 0xED, 0x25, 0x72, 0x3F, 0x48,
];
const VERSION: [u8; 2] = [0xFF, 0x36];
const TYPE: [u8; 2] = [0x22, 0x66];
const FEE: [u8; 8] = [0xB6, 0x05, 0xDC, 0x0C, 0x4C, 0xF7, 0xF2, 0x06];
const DEADLINE: [u8; 8] = [0xF2, 0x26, 0x0C, 0x4C, 0xF7, 0xF1, 0x6C, 0x06];
const RECIPIENT: [u8; 25] = [
    0x3E, 0xE9, 0xFA, 0x15, 0xA3, 0xB6, 0x05, 0xDC, 0x0C, 0x4C, 0xF7, 0xF1, 0xB1, 0x5A, 0xAB, 0xDC,
    0xCC, 0x2E, 0x09, 0x59, 0x38, 0x97, 0xF2, 0x69, 0xD9,
];
const MOSAIC: [u8; 16] = [
    0xF2, 0x26, 0x6C, 0x06, 0x40, 0x83, 0xB2, 0x92, 0x44, 0x44, 0x44, 0x44, 0x44, 0x44, 0x44, 0x44,
];

fn join(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

fn message() -> Vec<u8> {
    [0x05, 0xDC].repeat(9)
}

fn transaction_header() -> Vec<u8> {
    join(&[&SIZE, &SIGNATURE, &SIGNER, &VERSION, &TYPE, &FEE, &DEADLINE])
}

fn transfer_body() -> Vec<u8> {
    join(&[&RECIPIENT, &[0x12, 0x00], &[0x02], &message(), &MOSAIC, &MOSAIC])
}

#[test]
fn test_transfer_transaction() {
    let bytes = join(&[&transaction_header(), &transfer_body()]);
    let transfer = TransferTransaction::decode(&bytes).unwrap();

    let transaction = &transfer.transaction;
    assert_eq!(transaction.entity.size, 0x066C26F2);
    assert_eq!(transaction.verifiable.signature, SIGNATURE);
    assert_eq!(transaction.body.signer, SIGNER);
    assert_eq!(transaction.body.version, 0x36FF);
    assert_eq!(transaction.body.entity_type, 0x6622);
    assert_eq!(transaction.fee, u64::from_le_bytes(FEE));
    assert_eq!(transaction.deadline, u64::from_le_bytes(DEADLINE));

    let body = &transfer.body;
    assert_eq!(body.recipient, RECIPIENT);
    assert_eq!(body.message, Bytes::from(message()));
    assert_eq!(body.message_size(), Ok(18));
    assert_eq!(body.mosaics_count(), Ok(2));
    assert_eq!(
        body.mosaics[0],
        Mosaic {
            mosaic_id: [0xF2, 0x26, 0x6C, 0x06, 0x40, 0x83, 0xB2, 0x92],
            amount: [0x44; 8],
        }
    );
    assert_eq!(body.mosaics[1], body.mosaics[0]);

    assert_eq!(transfer.encode_size(), bytes.len());
    assert_eq!(transfer.encode().unwrap().to_vec(), bytes);
}

#[test]
fn test_embedded_transfer_transaction() {
    let bytes = join(&[&SIZE, &SIGNER, &VERSION, &TYPE, &transfer_body()]);
    let transfer = EmbeddedTransferTransaction::decode(&bytes).unwrap();
    assert_eq!(transfer.transaction.entity.size, 0x066C26F2);
    assert_eq!(transfer.transaction.body.signer, SIGNER);
    assert_eq!(transfer.body.mosaics.len(), 2);
    assert_eq!(transfer.encode().unwrap().to_vec(), bytes);
}

#[test]
fn test_transfer_with_53_byte_message() {
    let message = [
        0xE8, 0x34, 0x62, 0x6D, 0x00, 0x3C, 0xBF, 0xC2, 0x18, 0x0D, 0x71, 0xED, 0x25, 0x72, 0x3F,
        0x48, 0x3E, 0xE9, 0xFA, 0x15, 0xA3, 0xB6, 0x05, 0xDC, 0x0C, 0x4C, 0xF7, 0xF1, 0xB1, 0x5A,
        0xAB, 0xDC, 0xCC, 0x2E, 0x09, 0x59, 0x38, 0x97, 0xF2, 0x69, 0xD9, 0xE2, 0x56, 0x29, 0x2B,
        0xF3, 0x52, 0xC0, 0xAA, 0xBB, 0x55, 0xFF, 0x44,
    ];
    let bytes = join(&[
        &SIZE,
        &SIGNER,
        &[0xF2, 0x26],
        &[0xFF, 0x34],
        &RECIPIENT,
        &[0x35, 0x00],
        &[0x00],
        &message,
    ]);
    let transfer = EmbeddedTransferTransaction::decode(&bytes).unwrap();
    assert_eq!(transfer.transaction.body.version, 0x26F2);
    assert_eq!(transfer.body.message_size(), Ok(53));
    assert_eq!(&transfer.body.message[..], &message[..]);
    assert!(transfer.body.mosaics.is_empty());
    assert_eq!(transfer.encode().unwrap().to_vec(), bytes);
}

#[test]
fn test_transfer_truncated_and_padded() {
    let bytes = join(&[&transaction_header(), &transfer_body()]);

    let short = &bytes[..bytes.len() - 1];
    assert_eq!(
        TransferTransaction::decode(short),
        Err(Error::OutOfRange {
            requested: 8,
            remaining: 7
        })
    );

    let mut long = bytes.clone();
    long.extend_from_slice(&[0, 0]);
    assert_eq!(TransferTransaction::decode(&long), Err(Error::TrailingData(2)));
}

#[test]
fn test_account_properties_address_transaction() {
    let first = join(&[&[0x04], &[0x34u8, 0x77].repeat(12), &[0x34]]);
    let second = join(&[&[0x05], &[0x44u8, 0x33].repeat(12), &[0x44]]);
    let bytes = join(&[&transaction_header(), &[0x26, 0x02], &first, &second]);

    let transaction = AccountPropertiesAddressTransaction::decode(&bytes).unwrap();
    assert_eq!(transaction.body.property_type, 0x26);
    assert_eq!(transaction.body.modifications_count(), Ok(2));
    assert_eq!(transaction.body.modifications[0].modification_type, 0x04);
    assert_eq!(&transaction.body.modifications[0].value[..], &first[1..]);
    assert_eq!(transaction.body.modifications[1].modification_type, 0x05);
    assert_eq!(&transaction.body.modifications[1].value[..], &second[1..]);
    assert_eq!(transaction.encode().unwrap().to_vec(), bytes);
}

#[test]
fn test_account_properties_mosaic_transaction() {
    let value = [0x3E, 0xE9, 0xFA, 0x15, 0xA3, 0xB6, 0x05, 0xDC];
    let bytes = join(&[
        &transaction_header(),
        &[0x26, 0x02],
        &[0xF2],
        &value,
        &[0x01],
        &value,
    ]);

    let transaction = AccountPropertiesMosaicTransaction::decode(&bytes).unwrap();
    assert_eq!(transaction.body.modifications.len(), 2);
    assert_eq!(transaction.body.modifications[0].modification_type, 0xF2);
    assert_eq!(transaction.body.modifications[1].value, value);
    assert_eq!(transaction.encode().unwrap().to_vec(), bytes);
}

#[test]
fn test_account_properties_entity_type_transaction() {
    let bytes = join(&[
        &transaction_header(),
        &[0x26, 0x02],
        &[0xF2, 0x3E, 0xE9],
        &[0x00, 0x54, 0x41],
    ]);

    let transaction = AccountPropertiesEntityTypeTransaction::decode(&bytes).unwrap();
    assert_eq!(transaction.body.modifications[0].value, 0xE93E);
    assert_eq!(transaction.body.modifications[1].value, 0x4154);
    assert_eq!(transaction.encode_size(), 120 + 2 + 6);
    assert_eq!(transaction.encode().unwrap().to_vec(), bytes);
}
