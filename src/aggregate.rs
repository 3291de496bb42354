//! Summary aggregation over contract record sets.

use crate::models::{ContractRecord, OptionType, SummaryStatistics};

/// Reduces a record set to its summary statistics.
///
/// Pure function: counts partitioned by option type and exact floating-point
/// sums of volume and open interest. An empty slice yields zero counts and
/// `0.0` sums, never an error.
#[must_use]
pub fn summarize(records: &[ContractRecord]) -> SummaryStatistics {
    let call_options = records
        .iter()
        .filter(|r| r.option_type == OptionType::Call)
        .count();

    SummaryStatistics {
        total_options: records.len(),
        call_options,
        put_options: records.len() - call_options,
        total_volume_24h: records.iter().map(|r| r.volume_24h).sum(),
        total_open_interest: records.iter().map(|r| r.open_interest).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(option_type: OptionType, volume_24h: f64, open_interest: f64) -> ContractRecord {
        ContractRecord {
            symbol: "BTC-29DEC23-50000-C".to_string(),
            strike_price: 50000.0,
            option_type,
            last_price: 0.0,
            mark_price: 0.0,
            underlying_price: 0.0,
            delta: 0.0,
            gamma: 0.0,
            theta: 0.0,
            vega: 0.0,
            volume_24h,
            open_interest,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_empty_set_is_all_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_options, 0);
        assert_eq!(summary.call_options, 0);
        assert_eq!(summary.put_options, 0);
        assert_eq!(summary.total_volume_24h, 0.0);
        assert_eq!(summary.total_open_interest, 0.0);
    }

    #[test]
    fn test_partition_counts_add_up() {
        let records = vec![
            record(OptionType::Call, 10.0, 1.0),
            record(OptionType::Put, 20.0, 2.0),
            record(OptionType::Call, 30.0, 3.0),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_options, 3);
        assert_eq!(summary.call_options, 2);
        assert_eq!(summary.put_options, 1);
        assert_eq!(summary.call_options + summary.put_options, summary.total_options);
    }

    #[test]
    fn test_sums_are_exact() {
        let records = vec![
            record(OptionType::Call, 123.45, 10.5),
            record(OptionType::Put, 0.55, 0.25),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_volume_24h, 123.45 + 0.55);
        assert_eq!(summary.total_open_interest, 10.5 + 0.25);
    }

    #[test]
    fn test_order_independent() {
        let a = record(OptionType::Call, 5.0, 1.0);
        let b = record(OptionType::Put, 7.0, 2.0);

        let forward = summarize(&[a.clone(), b.clone()]);
        let reverse = summarize(&[b, a]);
        assert_eq!(forward, reverse);
    }
}
