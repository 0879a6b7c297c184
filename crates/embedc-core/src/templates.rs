//! Fixed C source templates, one per supported peripheral.
//!
//! Register addresses are illustrative example values for an STM32-like
//! memory map. They are not derived from any datasheet.

use std::fmt;
use std::str::FromStr;

/// Which template a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peripheral {
    LedBlink,
    Uart,
    Spi,
    Gpio,
    I2c,
    Timer,
    Adc,
    Pwm,
    /// No keyword matched.
    Placeholder,
}

impl Peripheral {
    /// Keyword-bearing variants in match order. The first whose keyword
    /// occurs in the query wins.
    pub const PRECEDENCE: [Peripheral; 8] = [
        Peripheral::LedBlink,
        Peripheral::Uart,
        Peripheral::Spi,
        Peripheral::Gpio,
        Peripheral::I2c,
        Peripheral::Timer,
        Peripheral::Adc,
        Peripheral::Pwm,
    ];

    /// Lower-case substrings that select this template.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Peripheral::LedBlink => &["blink", "led"],
            Peripheral::Uart => &["uart"],
            Peripheral::Spi => &["spi"],
            Peripheral::Gpio => &["gpio"],
            Peripheral::I2c => &["i2c"],
            Peripheral::Timer => &["timer"],
            Peripheral::Adc => &["adc"],
            Peripheral::Pwm => &["pwm"],
            Peripheral::Placeholder => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Peripheral::LedBlink => "led-blink",
            Peripheral::Uart => "uart",
            Peripheral::Spi => "spi",
            Peripheral::Gpio => "gpio",
            Peripheral::I2c => "i2c",
            Peripheral::Timer => "timer",
            Peripheral::Adc => "adc",
            Peripheral::Pwm => "pwm",
            Peripheral::Placeholder => "placeholder",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Peripheral::LedBlink => LED_BLINK,
            Peripheral::Uart => UART,
            Peripheral::Spi => SPI,
            Peripheral::Gpio => GPIO,
            Peripheral::I2c => I2C,
            Peripheral::Timer => TIMER,
            Peripheral::Adc => ADC,
            Peripheral::Pwm => PWM,
            Peripheral::Placeholder => PLACEHOLDER,
        }
    }

    /// Case-insensitive substring match of `query` against [`Self::PRECEDENCE`].
    pub fn select(query: &str) -> Peripheral {
        let q = query.to_lowercase();
        Self::PRECEDENCE
            .into_iter()
            .find(|p| p.keywords().iter().any(|kw| q.contains(kw)))
            .unwrap_or(Peripheral::Placeholder)
    }
}

impl fmt::Display for Peripheral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Peripheral {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::PRECEDENCE
            .into_iter()
            .chain(std::iter::once(Peripheral::Placeholder))
            .find(|p| p.label() == wanted)
            .ok_or_else(|| format!("unknown peripheral: {s}"))
    }
}

const LED_BLINK: &str = r#"
#include <stdint.h>
#include <stdbool.h>

/* LED blink example - MISRA-C style
 * Replace LED_PORT/LED_PIN addresses with target MCU values from datasheet.
 */
#define LED_GPIO_MODER ((volatile uint32_t *)0x48000000U)  /* example address */
#define LED_GPIO_ODR   ((volatile uint32_t *)0x48000014U)  /* example address */

static void delay_ms(uint32_t count)
{
    /* Simple busy-wait delay. Replace with timer-based if available. */
    volatile uint32_t i;
    for (i = 0U; i < (1000U * count); ++i)
    {
        /* Prevent optimization */
        (void)i;
    }
}

void LED_Blink(uint32_t times, uint32_t on_ms, uint32_t off_ms)
{
    uint32_t idx;
    for (idx = 0U; idx < times; ++idx)
    {
        /* Set pin high (example assumes bit 0) */
        *LED_GPIO_ODR |= (uint32_t)(1U << 0);
        delay_ms(on_ms);

        /* Set pin low */
        *LED_GPIO_ODR &= (uint32_t)~(1U << 0);
        delay_ms(off_ms);
    }
}
"#;

const UART: &str = r#"
#include <stdint.h>
#include <stdbool.h>

void UART_Init(void)
{
    volatile uint32_t * const UART_CR  = (uint32_t *)0x40011000U;
    volatile uint32_t * const UART_BRR = (uint32_t *)0x4001100CU;

    *UART_BRR = (uint32_t)0x1A1U;
    *UART_CR  = (uint32_t)((1U << 0) | (1U << 2) | (1U << 3));
}
"#;

const SPI: &str = r#"
#include <stdint.h>
#include <stdbool.h>

void SPI_Init(void)
{
    volatile uint32_t * const SPI_CR1 = (uint32_t *)0x40013000U;
    *SPI_CR1 = (uint32_t)((1U << 2) | (0x2U << 3));
    *SPI_CR1 |= (uint32_t)(1U << 6);
}
"#;

const GPIO: &str = r#"
#include <stdint.h>
#include <stdbool.h>

void GPIO_Init(void)
{
    volatile uint32_t * const GPIO_MODER = (uint32_t *)0x48000000U;
    *GPIO_MODER &= (uint32_t)~(0x3U << (0U * 2U));
    *GPIO_MODER |= (uint32_t)(0x1U << (0U * 2U));
}
"#;

const I2C: &str = r#"
#include <stdint.h>
#include <stdbool.h>

void I2C_Init(void)
{
    volatile uint32_t * const I2C_CR1    = (uint32_t *)0x40005400U;
    volatile uint32_t * const I2C_TIMING = (uint32_t *)0x40005410U;

    *I2C_TIMING = (uint32_t)0x10420F13U;
    *I2C_CR1 |= (uint32_t)(1U << 0);
}
"#;

const TIMER: &str = r#"
#include <stdint.h>
#include <stdbool.h>

void Timer_Init(void)
{
    volatile uint32_t * const TIM_CR1 = (uint32_t *)0x40000000U;
    volatile uint32_t * const TIM_PSC = (uint32_t *)0x40000028U;
    volatile uint32_t * const TIM_ARR = (uint32_t *)0x4000002CU;

    *TIM_PSC = (uint32_t)7999U;
    *TIM_ARR = (uint32_t)999U;
    *TIM_CR1 |= (uint32_t)(1U << 0);
}
"#;

const ADC: &str = r#"
#include <stdint.h>
#include <stdbool.h>

void ADC_Init(void)
{
    volatile uint32_t * const ADC_CR    = (uint32_t *)0x50000008U;
    volatile uint32_t * const ADC_CHSEL = (uint32_t *)0x50000028U;

    *ADC_CHSEL = (uint32_t)(1U << 0);
    *ADC_CR |= (uint32_t)(1U << 0);
}
"#;

const PWM: &str = r#"
#include <stdint.h>
#include <stdbool.h>

void PWM_Init(void)
{
    volatile uint32_t * const TIM_CCMR1 = (uint32_t *)0x40000018U;
    volatile uint32_t * const TIM_CCER  = (uint32_t *)0x40000020U;
    volatile uint32_t * const TIM_CCR1  = (uint32_t *)0x40000034U;
    volatile uint32_t * const TIM_CR1   = (uint32_t *)0x40000000U;

    *TIM_CCMR1 |= (uint32_t)(0x6U << 4);
    *TIM_CCR1 = (uint32_t)500U;
    *TIM_CCER |= (uint32_t)(1U << 0);
    *TIM_CR1 |= (uint32_t)(1U << 0);
}
"#;

const PLACEHOLDER: &str = r#"
/* Placeholder. No matching template found for query. */
void Device_Init(void)
{
    /* Implementation pending */
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_keyword_selects_its_template() {
        for p in Peripheral::PRECEDENCE {
            for kw in p.keywords() {
                assert_eq!(Peripheral::select(&format!("please write {kw} code")), p);
            }
        }
    }

    #[test]
    fn earlier_keyword_wins() {
        assert_eq!(Peripheral::select("blink uart"), Peripheral::LedBlink);
        assert_eq!(Peripheral::select("uart over spi"), Peripheral::Uart);
        assert_eq!(Peripheral::select("pwm from a timer"), Peripheral::Timer);
        assert_eq!(Peripheral::select("adc triggered by pwm"), Peripheral::Adc);
    }

    #[test]
    fn substring_match_is_not_word_bound() {
        // "led" occurs inside "enabled"
        assert_eq!(Peripheral::select("enabled uart"), Peripheral::LedBlink);
    }

    #[test]
    fn unmatched_query_selects_placeholder() {
        assert_eq!(Peripheral::select("watchdog"), Peripheral::Placeholder);
        assert_eq!(Peripheral::select(""), Peripheral::Placeholder);
    }

    #[test]
    fn templates_are_distinct_and_newline_prefixed() {
        let all: Vec<Peripheral> = Peripheral::PRECEDENCE
            .into_iter()
            .chain([Peripheral::Placeholder])
            .collect();
        for (i, a) in all.iter().enumerate() {
            assert!(a.template().starts_with('\n'), "{a}");
            assert!(a.template().ends_with("}\n"), "{a}");
            for b in &all[i + 1..] {
                assert_ne!(a.template(), b.template());
            }
        }
    }

    #[test]
    fn placeholder_has_no_register_access() {
        assert!(PLACEHOLDER.contains("Device_Init"));
        assert!(!PLACEHOLDER.contains("volatile"));
    }

    #[test]
    fn label_parses_back() {
        assert_eq!("UART".parse::<Peripheral>(), Ok(Peripheral::Uart));
        assert_eq!("led-blink".parse::<Peripheral>(), Ok(Peripheral::LedBlink));
        assert_eq!("placeholder".parse::<Peripheral>(), Ok(Peripheral::Placeholder));
        assert!("can".parse::<Peripheral>().is_err());
    }
}
