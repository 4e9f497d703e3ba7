//! Moving averages over candle highs and lows

use rust_decimal::Decimal;

use crate::common::types::{Candle, MovingAverages};

/// Simple moving average of the last `period` values
///
/// Zero until `period` values are available.
pub fn sma_last(values: &[Decimal], period: usize) -> Decimal {
    if period == 0 || values.len() < period {
        return Decimal::ZERO;
    }
    let window = &values[values.len() - period..];
    window.iter().sum::<Decimal>() / Decimal::from(period)
}

/// MA3/MA6 of highs and lows as of the last candle
///
/// Candles are expected oldest first.
pub fn moving_averages(candles: &[Candle]) -> MovingAverages {
    let highs: Vec<Decimal> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<Decimal> = candles.iter().map(|c| c.low).collect();

    MovingAverages {
        ma_3_high: sma_last(&highs, 3),
        ma_3_low: sma_last(&lows, 3),
        ma_6_high: sma_last(&highs, 6),
        ma_6_low: sma_last(&lows, 6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candle(high: Decimal, low: Decimal) -> Candle {
        Candle {
            timestamp: 0,
            open: low,
            high,
            low,
            close: high,
            volume: dec!(1),
        }
    }

    #[test]
    fn test_sma_last() {
        let values = [dec!(1), dec!(2), dec!(3), dec!(4)];
        assert_eq!(sma_last(&values, 3), dec!(3));
        assert_eq!(sma_last(&values, 4), dec!(2.5));
        assert_eq!(sma_last(&values, 5), Decimal::ZERO);
        assert_eq!(sma_last(&values, 0), Decimal::ZERO);
    }

    #[test]
    fn test_moving_averages() {
        let candles: Vec<Candle> = (1..=6)
            .map(|i| candle(Decimal::from(i * 10), Decimal::from(i)))
            .collect();

        let ma = moving_averages(&candles);
        assert_eq!(ma.ma_3_high, dec!(50));
        assert_eq!(ma.ma_3_low, dec!(5));
        assert_eq!(ma.ma_6_high, dec!(35));
        assert_eq!(ma.ma_6_low, dec!(3.5));
    }

    #[test]
    fn test_short_history_keeps_long_window_zero() {
        let candles = vec![
            candle(dec!(10), dec!(1)),
            candle(dec!(20), dec!(2)),
            candle(dec!(30), dec!(3)),
        ];

        let ma = moving_averages(&candles);
        assert_eq!(ma.ma_3_high, dec!(20));
        assert_eq!(ma.ma_6_high, Decimal::ZERO);
        assert_eq!(ma.ma_6_low, Decimal::ZERO);
    }
}
