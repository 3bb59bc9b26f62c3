//! Property tests for the conversion round trips and MGRS string invariants.

use _rust::convert::Converter;
use _rust::utm::geodetic_to_utm_in_zone;
use _rust::mgrs::tables::LetterPattern;
use _rust::mgrs::GridPosition;
use _rust::{Hemisphere, MgrsReference, Status};
use proptest::prelude::*;

fn converter() -> Converter {
    Converter::wgs84()
}

fn hemisphere() -> impl Strategy<Value = char> {
    prop_oneof![Just('N'), Just('S')]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn geodetic_mgrs_roundtrip_within_a_metre(
        lat_deg in -80.0f64..84.0,
        lon_deg in -180.0f64..180.0,
    ) {
        let c = converter();
        let (lat, lon) = (lat_deg.to_radians(), lon_deg.to_radians());
        let mgrs = c.geodetic_to_mgrs(lat, lon, 5).unwrap().value;
        let utm = c.geodetic_to_utm(lat, lon).unwrap().value;
        let decoded = c.mgrs_to_utm(&mgrs).unwrap().value;

        prop_assert_eq!(decoded.zone, utm.zone);
        prop_assert_eq!(decoded.hemisphere, utm.hemisphere);
        // The UTM decode is the south-west corner of the 1 m cell.
        let de = utm.easting - decoded.easting;
        let dn = utm.northing - decoded.northing;
        prop_assert!((-1e-6..1.0).contains(&de), "easting off by {de} for {mgrs}");
        prop_assert!((-1e-6..1.0).contains(&dn), "northing off by {dn} for {mgrs}");

        let geo = c.mgrs_to_geodetic(&mgrs).unwrap().value;
        let dlat = (geo.lat - lat) * 6_371_000.0;
        let dlon = (geo.lon - lon) * 6_371_000.0 * lat.cos();
        prop_assert!(dlat.hypot(dlon) < 1.0, "{mgrs} decodes {} m away", dlat.hypot(dlon));
    }

    #[test]
    fn polar_mgrs_roundtrip(
        colat_deg in 0.0f64..5.9,
        lon_deg in -180.0f64..180.0,
        north in any::<bool>(),
    ) {
        let c = converter();
        let lat_deg = if north { 90.0 - colat_deg } else { -90.0 + colat_deg * 1.6 };
        let (lat, lon) = (lat_deg.to_radians(), lon_deg.to_radians());
        let mgrs = c.geodetic_to_mgrs(lat, lon, 5).unwrap().value;
        prop_assert!(mgrs.starts_with(|ch| matches!(ch, 'A' | 'B' | 'Y' | 'Z')), "{mgrs}");

        let ups = c.geodetic_to_ups(lat, lon).unwrap().value;
        let decoded = c.mgrs_to_ups(&mgrs).unwrap().value;
        prop_assert_eq!(decoded.hemisphere, ups.hemisphere);
        prop_assert!((-1e-6..1.0).contains(&(ups.easting - decoded.easting)));
        prop_assert!((-1e-6..1.0).contains(&(ups.northing - decoded.northing)));
    }

    #[test]
    fn utm_geodetic_roundtrip(
        zone in 1i32..=60,
        hemi in hemisphere(),
        easting in 300_000.0f64..700_000.0,
        northing_n in 1.0f64..9_300_000.0,
        northing_s in 1_200_000.0f64..9_999_000.0,
    ) {
        let c = converter();
        let northing = if hemi == 'N' { northing_n } else { northing_s };
        let geo = c.utm_to_geodetic(zone, hemi, easting, northing).unwrap().value;
        let back = geodetic_to_utm_in_zone(c.ellipsoid(), geo.lat, geo.lon, zone as u8)
            .unwrap()
            .value;
        prop_assert_eq!(back.zone as i32, zone);
        prop_assert_eq!(back.hemisphere.as_char(), hemi);
        prop_assert!((back.easting - easting).abs() < 1e-6);
        prop_assert!((back.northing - northing).abs() < 1e-6);
    }

    #[test]
    fn utm_keeps_its_zone_away_from_edges(
        zone in 1i32..=60,
        easting in 420_000.0f64..580_000.0,
        northing in 0.0f64..6_000_000.0,
    ) {
        // Clear of zone edges and of the Norway/Svalbard exceptions.
        let c = converter();
        let geo = c.utm_to_geodetic(zone, 'N', easting, northing).unwrap().value;
        let back = c.geodetic_to_utm(geo.lat, geo.lon).unwrap().value;
        prop_assert_eq!(back.zone as i32, zone);
        prop_assert_eq!(back.hemisphere, Hemisphere::North);
    }

    #[test]
    fn precision_sets_digit_count(
        lat_deg in -89.9f64..89.9,
        lon_deg in -180.0f64..180.0,
        precision in 0i32..=5,
    ) {
        let c = converter();
        let (lat, lon) = (lat_deg.to_radians(), lon_deg.to_radians());
        let reference = c.geodetic_to_reference(lat, lon, precision).unwrap().value;
        let mgrs = reference.to_string();
        prop_assert_eq!(i32::from(reference.precision()), precision);
        let digits = mgrs.chars().filter(char::is_ascii_digit).count();
        let zone_digits = if reference.is_polar() { 0 } else { 2 };
        prop_assert_eq!(digits, zone_digits + 2 * precision as usize);
        prop_assert_eq!(&mgrs.parse::<MgrsReference>().unwrap(), &reference);

        // Re-encoding the decoded cell corner yields the same reference.
        let p = precision as u8;
        let again = match reference.to_grid(LetterPattern::AA).unwrap() {
            GridPosition::Utm(u) => {
                MgrsReference::from_utm(u.zone, lat, u.easting, u.northing, p, LetterPattern::AA)
            }
            GridPosition::Ups(u) => MgrsReference::from_ups(u.hemisphere, u.easting, u.northing, p),
        };
        prop_assert_eq!(again.unwrap(), reference);
    }

    #[test]
    fn decode_then_encode_is_idempotent(
        lat_deg in -89.9f64..89.9,
        lon_deg in -180.0f64..180.0,
    ) {
        let c = converter();
        let mgrs = c
            .geodetic_to_mgrs(lat_deg.to_radians(), lon_deg.to_radians(), 5)
            .unwrap()
            .value;
        let geo = c.mgrs_to_geodetic(&mgrs).unwrap().value;
        let again = c.geodetic_to_mgrs(geo.lat, geo.lon, 5).unwrap().value;
        prop_assert_eq!(again, mgrs);
    }

    #[test]
    fn square_letters_never_ambiguous(
        lat_deg in -90.0f64..=90.0,
        lon_deg in -180.0f64..180.0,
        precision in 0i32..=5,
    ) {
        let c = converter();
        let mgrs = c
            .geodetic_to_mgrs(lat_deg.to_radians(), lon_deg.to_radians(), precision)
            .unwrap()
            .value;
        let letters: String = mgrs.chars().filter(char::is_ascii_alphabetic).collect();
        prop_assert_eq!(letters.len(), 3);
        prop_assert!(!letters.contains('I') && !letters.contains('O'), "{mgrs}");
    }

    #[test]
    fn parse_never_panics(s in "\\PC{0,20}") {
        let _ = s.parse::<MgrsReference>();
    }

    #[test]
    fn odd_digit_tails_are_rejected(digits in "[0-9]{1,9}") {
        prop_assume!(digits.len() % 2 == 1);
        let err = format!("48PUV{digits}").parse::<MgrsReference>().unwrap_err();
        prop_assert_eq!(err.status(), Status::STRING);
    }
}
