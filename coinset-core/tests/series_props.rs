use coinset_core::{CoinsetError, Decimal, NaiveDate, PriceSeries, RawObservation};
use proptest::prelude::*;
use std::collections::BTreeMap;

const DAY_MS: i64 = 86_400_000;

fn ms(date: &str, hh: i64) -> i64 {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    d.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis() + hh * 3_600_000
}

fn arb_raw() -> impl Strategy<Value = RawObservation> {
    // Roughly 2000-01-01 .. 2033-05-18, anywhere within the day
    (0i64..12_200i64, 0i64..DAY_MS, 0i64..10_000_000i64).prop_map(|(day, offset, cents)| {
        RawObservation::new(946_684_800_000 + day * DAY_MS + offset, Decimal::new(cents, 2))
    })
}

#[test]
fn same_day_duplicates_collapse_to_their_mean() {
    let raw = vec![
        RawObservation::new(ms("2024-03-01", 2), Decimal::from(10)),
        RawObservation::new(ms("2024-03-01", 20), Decimal::from(20)),
    ];
    let series = PriceSeries::from_raw(raw).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.points()[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(series.points()[0].price, Decimal::from(15));
}

#[test]
fn out_of_order_input_is_sorted_by_date() {
    let raw = vec![
        RawObservation::new(ms("2024-03-03", 0), Decimal::from(3)),
        RawObservation::new(ms("2024-03-01", 0), Decimal::from(1)),
        RawObservation::new(ms("2024-03-02", 0), Decimal::from(2)),
    ];
    let series = PriceSeries::from_raw(raw).unwrap();
    let prices: Vec<Decimal> = series.prices().collect();
    assert_eq!(prices, vec![Decimal::from(1), Decimal::from(2), Decimal::from(3)]);
    let (first, last) = series.span().unwrap();
    assert_eq!(first, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(last, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
}

#[test]
fn empty_input_is_an_empty_series() {
    let series = PriceSeries::from_raw(Vec::new()).unwrap();
    assert!(series.is_empty());
    assert!(series.span().is_none());
}

#[test]
fn negative_price_is_a_parse_error() {
    let raw = vec![RawObservation::new(0, Decimal::new(-1, 0))];
    assert!(matches!(PriceSeries::from_raw(raw), Err(CoinsetError::Parse(_))));
}

#[test]
fn unrepresentable_timestamp_is_a_parse_error() {
    let raw = vec![RawObservation::new(i64::MAX, Decimal::ONE)];
    assert!(matches!(PriceSeries::from_raw(raw), Err(CoinsetError::Parse(_))));
}

#[test]
fn try_from_observations_checks_ordering() {
    let a = coinset_core::PriceObservation {
        date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        price: Decimal::ONE,
    };
    let b = coinset_core::PriceObservation {
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        price: Decimal::ONE,
    };
    assert!(PriceSeries::try_from_observations(vec![a, b]).is_err());
    assert!(PriceSeries::try_from_observations(vec![b, a]).is_ok());
    assert!(PriceSeries::try_from_observations(vec![a, a]).is_err());
}

proptest! {
    #[test]
    fn dates_strictly_increase(raw in proptest::collection::vec(arb_raw(), 0..300)) {
        let series = PriceSeries::from_raw(raw).unwrap();
        for pair in series.points().windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn one_point_per_distinct_day_holding_the_mean(raw in proptest::collection::vec(arb_raw(), 0..300)) {
        let mut expected: BTreeMap<i64, (Decimal, u32)> = BTreeMap::new();
        for r in &raw {
            let e = expected.entry(r.timestamp_ms.div_euclid(DAY_MS)).or_insert((Decimal::ZERO, 0));
            e.0 += r.price;
            e.1 += 1;
        }

        let series = PriceSeries::from_raw(raw).unwrap();
        prop_assert_eq!(series.len(), expected.len());
        for (point, (_, (sum, count))) in series.points().iter().zip(expected.iter()) {
            prop_assert_eq!(point.price, *sum / Decimal::from(*count));
            prop_assert!(point.price >= Decimal::ZERO);
        }
    }

    #[test]
    fn input_order_does_not_matter(raw in proptest::collection::vec(arb_raw(), 0..200)) {
        let forward = PriceSeries::from_raw(raw.clone()).unwrap();
        let backward = PriceSeries::from_raw(raw.into_iter().rev()).unwrap();
        prop_assert_eq!(forward, backward);
    }
}
