//! MuPDF as the sole backend and as the fallback behind lopdf.

#![cfg(feature = "mupdf")]

use common::{pdf_with_pages, without_xref};
use embedc_ingest::{DatasheetPayload, TextExtractor, extractor_with_order};

mod common;

fn extractor(order: &[&str]) -> TextExtractor {
    let order: Vec<String> = order.iter().map(|s| s.to_string()).collect();
    extractor_with_order(Some(order.as_slice()))
}

#[test]
fn mupdf_alone_keeps_page_order() {
    let bytes = pdf_with_pages(&["RCC clock enable", "NVIC priority group", "DMA stream config"]);

    let extraction = extractor(&["mupdf"]).extract_detailed(DatasheetPayload::Bytes(&bytes));

    assert_eq!(extraction.backend, Some("mupdf"));
    assert_eq!(extraction.pages_total, 3);
    assert_eq!(extraction.pages_failed, 0);

    let text = extraction.text;
    let first = text.find("RCC clock enable").expect("page 1 text");
    let second = text.find("NVIC priority group").expect("page 2 text");
    let third = text.find("DMA stream config").expect("page 3 text");
    assert!(first < second && second < third, "{text:?}");
}

#[test]
fn mupdf_rejects_garbage() {
    let extraction =
        extractor(&["mupdf"]).extract_detailed(DatasheetPayload::Bytes(b"PK\x03\x04 not a pdf"));
    assert_eq!(extraction.backend, None);
    assert_eq!(extraction.text, "");
}

#[cfg(feature = "lopdf")]
#[test]
fn damaged_xref_falls_back_to_mupdf() {
    let bytes = without_xref(pdf_with_pages(&["EXTI line mask", "SysTick reload"]));

    let lopdf_alone = extractor(&["lopdf"]).extract_detailed(DatasheetPayload::Bytes(&bytes));
    assert_eq!(lopdf_alone.backend, None);

    let extraction =
        extractor(&["lopdf", "mupdf"]).extract_detailed(DatasheetPayload::Bytes(&bytes));

    assert_eq!(extraction.backend, Some("mupdf"));
    assert_eq!(extraction.pages_total, 2);
    let first = extraction.text.find("EXTI line mask").expect("page 1 text");
    let second = extraction.text.find("SysTick reload").expect("page 2 text");
    assert!(first < second, "{:?}", extraction.text);
}
