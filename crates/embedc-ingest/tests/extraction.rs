//! End-to-end extraction over real PDF bytes built in memory with lopdf.

#![cfg(feature = "lopdf")]

use std::io::{Cursor, Seek};

use common::pdf_with_pages;
use embedc_ingest::{DatasheetPayload, default_extractor, extractor_with_order};

mod common;

fn lopdf_only() -> embedc_ingest::TextExtractor {
    let order = vec!["lopdf".to_string()];
    extractor_with_order(Some(order.as_slice()))
}

#[test]
fn multi_page_text_in_page_order() {
    let bytes = pdf_with_pages(&["USART1 baud rate", "SPI1 clock phase", "GPIOA mode register"]);

    let extraction = lopdf_only().extract_detailed(DatasheetPayload::Bytes(&bytes));

    assert_eq!(extraction.backend, Some("lopdf"));
    assert_eq!(extraction.pages_total, 3);
    assert_eq!(extraction.pages_failed, 0);

    let text = extraction.text;
    let first = text.find("USART1 baud rate").expect("page 1 text");
    let second = text.find("SPI1 clock phase").expect("page 2 text");
    let third = text.find("GPIOA mode register").expect("page 3 text");
    assert!(first < second && second < third, "{text:?}");
    assert!(text[first..second].contains('\n'));
    assert!(text[second..third].contains('\n'));
}

#[test]
fn zero_page_document_yields_empty_text() {
    let bytes = pdf_with_pages(&[]);

    let extraction = lopdf_only().extract_detailed(DatasheetPayload::Bytes(&bytes));

    assert_eq!(extraction.backend, Some("lopdf"));
    assert_eq!(extraction.pages_total, 0);
    assert_eq!(extraction.text, "");
}

#[test]
fn garbage_bytes_yield_empty_text() {
    let text = default_extractor().extract(DatasheetPayload::Bytes(b"PK\x03\x04 definitely a zip"));
    assert_eq!(text, "");
}

#[test]
fn path_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stm32.pdf");
    std::fs::write(&path, pdf_with_pages(&["I2C timing register"])).unwrap();

    let text = default_extractor().extract(DatasheetPayload::Path(&path));
    assert!(text.contains("I2C timing register"), "{text:?}");
}

#[test]
fn missing_path_yields_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let text = default_extractor().extract(DatasheetPayload::Path(&dir.path().join("nope.pdf")));
    assert_eq!(text, "");
}

#[test]
fn stream_payload_is_rewound() {
    let mut cursor = Cursor::new(pdf_with_pages(&["ADC channel select"]));

    let text = default_extractor().extract(DatasheetPayload::Stream(&mut cursor));

    assert!(text.contains("ADC channel select"), "{text:?}");
    assert_eq!(cursor.stream_position().unwrap(), 0);
}

#[test]
fn extracted_text_feeds_responder() {
    let bytes = pdf_with_pages(&["TIM2 prescaler"]);
    let text = default_extractor().extract(DatasheetPayload::Bytes(&bytes));

    let response = embedc_core::respond("configure a timer", &text);
    assert_eq!(response.peripheral, embedc_core::Peripheral::Timer);
    assert!(response.to_string().contains("Timer_Init"));
}
