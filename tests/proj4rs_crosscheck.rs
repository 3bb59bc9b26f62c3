//! Cross-check the native UTM/UPS projections against proj4rs.

use _rust::convert::Converter;
use _rust::Hemisphere;
use approx::assert_relative_eq;
use proj4rs::Proj;

fn proj4rs_forward(dst: &str, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let src = Proj::from_user_string("+proj=longlat +ellps=WGS84").unwrap();
    let dst = Proj::from_user_string(dst).unwrap();
    let mut point = (lon_deg.to_radians(), lat_deg.to_radians());
    proj4rs::transform::transform(&src, &dst, &mut point).unwrap();
    point
}

#[test]
fn test_utm_matches_proj4rs() {
    let c = Converter::wgs84();
    let points: &[(f64, f64)] = &[
        (-93.0, 42.0),
        (105.2, 13.4),
        (151.2, -33.9),
        (-0.1, 51.5),
        (14.5, 79.0),
        (-70.6, -52.0),
        (177.5, 0.5),
        (-179.8, -12.0),
    ];
    for &(lon, lat) in points {
        let utm = c.geodetic_to_utm(lat.to_radians(), lon.to_radians()).unwrap().value;
        let south = if utm.hemisphere == Hemisphere::South { " +south" } else { "" };
        let def = format!("+proj=utm +zone={}{south} +ellps=WGS84", utm.zone);
        let (e, n) = proj4rs_forward(&def, lon, lat);
        // Centimetre agreement; the two series differ in truncation order.
        assert_relative_eq!(utm.easting, e, epsilon = 1e-2);
        assert_relative_eq!(utm.northing, n, epsilon = 1e-2);
    }
}

#[test]
fn test_ups_matches_proj4rs() {
    let c = Converter::wgs84();
    let points: &[(f64, f64)] = &[(0.0, 87.0), (45.0, 85.5), (-120.0, 89.0), (30.0, -85.0), (-150.0, -81.0)];
    for &(lon, lat) in points {
        let ups = c.geodetic_to_ups(lat.to_radians(), lon.to_radians()).unwrap().value;
        let def = if lat > 0.0 {
            "+proj=stere +lat_0=90 +lat_ts=90 +lon_0=0 +k=0.994 +x_0=2000000 +y_0=2000000 +ellps=WGS84"
        } else {
            "+proj=stere +lat_0=-90 +lat_ts=-90 +lon_0=0 +k=0.994 +x_0=2000000 +y_0=2000000 +ellps=WGS84"
        };
        let (e, n) = proj4rs_forward(def, lon, lat);
        assert_relative_eq!(ups.easting, e, epsilon = 1e-3);
        assert_relative_eq!(ups.northing, n, epsilon = 1e-3);
    }
}
