use std::fmt;

use crate::rules::RULE_LINES;
use crate::templates::Peripheral;

/// A header comment block plus exactly one code template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedResponse {
    pub query: String,
    pub peripheral: Peripheral,
    pub header: String,
    pub code: &'static str,
}

impl GeneratedResponse {
    pub fn into_string(self) -> String {
        self.header + self.code
    }
}

impl fmt::Display for GeneratedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        f.write_str(self.code)
    }
}

/// Build the comment header echoing `query` verbatim.
pub fn render_header(query: &str) -> String {
    format!(
        "/*\n * Auto-generated Embedded C Code (MISRA-C 2012 baseline)\n * Query: {query}\n *\n * MISRA Rules Applied:\n{}\n */\n",
        *RULE_LINES
    )
}

/// Pick a template for `query` and prefix it with the rule header.
///
/// `datasheet_text` is accepted so callers can pass extracted text through
/// the same interface, but this version does not read it. Template choice
/// depends on the query alone.
pub fn respond(query: &str, datasheet_text: &str) -> GeneratedResponse {
    let peripheral = Peripheral::select(query);
    tracing::debug!(peripheral = %peripheral, "selected template");
    respond_as(peripheral, query, datasheet_text)
}

/// Like [`respond`], but with the template chosen by the caller instead of
/// by keyword match. The header still echoes `query`.
pub fn respond_as(peripheral: Peripheral, query: &str, datasheet_text: &str) -> GeneratedResponse {
    let _unused_in_this_version = datasheet_text;

    GeneratedResponse {
        query: query.to_string(),
        peripheral,
        header: render_header(query),
        code: peripheral.template(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MISRA_RULES;

    #[test]
    fn blink_beats_uart() {
        let response = respond("blink uart", "");
        assert_eq!(response.peripheral, Peripheral::LedBlink);
        assert!(response.to_string().contains("LED_Blink"));
        assert!(!response.to_string().contains("UART_Init"));
    }

    #[test]
    fn matching_ignores_case_but_header_keeps_it() {
        let upper = respond("LED", "");
        let lower = respond("led", "");

        assert_eq!(upper.peripheral, Peripheral::LedBlink);
        assert_eq!(upper.code, lower.code);
        assert!(upper.header.contains(" * Query: LED\n"));
        assert!(lower.header.contains(" * Query: led\n"));
    }

    #[test]
    fn empty_query_gives_placeholder_with_empty_query_field() {
        let response = respond("", "");
        assert_eq!(response.peripheral, Peripheral::Placeholder);
        assert!(response.header.contains(" * Query: \n"));
        assert!(response.to_string().contains("Device_Init"));
    }

    #[test]
    fn every_response_lists_all_rules_once() {
        for query in ["uart", "spi", "gpio", "i2c", "timer", "adc", "pwm", "led", "nothing"] {
            let out = respond(query, "").into_string();
            for rule in MISRA_RULES {
                assert_eq!(out.matches(rule).count(), 1, "{query}: {rule}");
            }
        }
    }

    #[test]
    fn header_shape() {
        let header = render_header("Init SPI");
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines[0], "/*");
        assert_eq!(lines[1], " * Auto-generated Embedded C Code (MISRA-C 2012 baseline)");
        assert_eq!(lines[2], " * Query: Init SPI");
        assert_eq!(lines[3], " *");
        assert_eq!(lines[4], " * MISRA Rules Applied:");
        assert_eq!(lines[5], format!(" *  - {}", MISRA_RULES[0]));
        assert_eq!(lines[14], format!(" *  - {}", MISRA_RULES[9]));
        assert_eq!(lines[15], " */");
        assert_eq!(lines.len(), 16);
    }

    #[test]
    fn datasheet_text_does_not_influence_output() {
        let without = respond("configure the adc", "");
        let with = respond("configure the adc", "UART SPI GPIO blink led");
        assert_eq!(without, with);
    }

    #[test]
    fn forced_template_ignores_keywords() {
        let response = respond_as(Peripheral::Pwm, "blink uart", "");
        assert_eq!(response.peripheral, Peripheral::Pwm);
        assert!(response.header.contains(" * Query: blink uart\n"));
        assert!(response.to_string().contains("PWM_Init"));
        assert!(!response.to_string().contains("LED_Blink"));
    }

    #[test]
    fn output_is_header_then_code() {
        let response = respond("gpio", "");
        let expected = format!("{}{}", response.header, response.code);
        assert_eq!(response.clone().into_string(), expected);
        assert_eq!(response.to_string(), expected);
    }
}
