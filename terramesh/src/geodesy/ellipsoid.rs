//! Reference ellipsoid and frame conversions.

use super::{Geodetic2d, Geodetic3d};
use glam::{DMat3, DQuat, DVec3};

/// WGS84 semi-major axis in metres.
pub const WGS84_EQUATORIAL_RADIUS: f64 = 6_378_137.0;
/// WGS84 semi-minor axis in metres.
pub const WGS84_POLAR_RADIUS: f64 = 6_356_752.314_245_179;

/// Iteration cap for the geocentric-to-geodetic latitude refinement.
const MAX_GEODETIC_ITERATIONS: usize = 16;
/// Convergence threshold for the latitude refinement, in radians.
const GEODETIC_TOLERANCE: f64 = 1e-14;

/// An oblate ellipsoid of revolution about the polar (`+Y`) axis.
///
/// Stateless once built; share it freely across concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    equatorial_radius: f64,
    polar_radius: f64,
    eccentricity_squared: f64,
}

impl Ellipsoid {
    /// Creates an ellipsoid from its equatorial and polar radii.
    ///
    /// # Panics
    ///
    /// Panics if either radius is not strictly positive or the polar
    /// radius exceeds the equatorial radius.
    pub fn new(equatorial_radius: f64, polar_radius: f64) -> Self {
        assert!(
            equatorial_radius > 0.0 && polar_radius > 0.0,
            "ellipsoid radii must be > 0"
        );
        assert!(
            polar_radius <= equatorial_radius,
            "polar radius must not exceed equatorial radius"
        );
        let a2 = equatorial_radius * equatorial_radius;
        let b2 = polar_radius * polar_radius;
        Self {
            equatorial_radius,
            polar_radius,
            eccentricity_squared: (a2 - b2) / a2,
        }
    }

    /// The WGS84 reference ellipsoid.
    pub fn wgs84() -> Self {
        Self::new(WGS84_EQUATORIAL_RADIUS, WGS84_POLAR_RADIUS)
    }

    /// A sphere of radius 1.
    pub fn unit_sphere() -> Self {
        Self::new(1.0, 1.0)
    }

    pub fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    pub fn polar_radius(&self) -> f64 {
        self.polar_radius
    }

    /// First eccentricity squared, `(a² - b²) / a²`.
    pub fn eccentricity_squared(&self) -> f64 {
        self.eccentricity_squared
    }

    /// Radius of curvature in the prime vertical at a geodetic latitude.
    #[inline]
    fn prime_vertical_radius(&self, sin_lat: f64) -> f64 {
        self.equatorial_radius / (1.0 - self.eccentricity_squared * sin_lat * sin_lat).sqrt()
    }

    /// Unit surface normal at a geodetic coordinate.
    pub fn surface_normal(&self, geo: Geodetic2d) -> DVec3 {
        let (sin_lat, cos_lat) = geo.latitude_radians().sin_cos();
        let (sin_lon, cos_lon) = geo.longitude_radians().sin_cos();
        DVec3::new(cos_lat * cos_lon, sin_lat, cos_lat * sin_lon)
    }

    /// Projects a geodetic coordinate at `height` metres above the surface
    /// into the geocentric frame.
    ///
    /// Returns the geocentric point and the unit surface normal there.
    pub fn to_geocentric(&self, geo: Geodetic2d, height: f64) -> (DVec3, DVec3) {
        let (sin_lat, cos_lat) = geo.latitude_radians().sin_cos();
        let (sin_lon, cos_lon) = geo.longitude_radians().sin_cos();
        let n = self.prime_vertical_radius(sin_lat);

        let point = DVec3::new(
            (n + height) * cos_lat * cos_lon,
            (n * (1.0 - self.eccentricity_squared) + height) * sin_lat,
            (n + height) * cos_lat * sin_lon,
        );
        (point, self.surface_normal(geo))
    }

    /// Converts a geocentric point back to geodetic coordinates.
    ///
    /// Longitude is returned in (-180°, 180°]. Points on the polar axis map
    /// to longitude 0.
    pub fn to_geodetic(&self, point: DVec3) -> Geodetic3d {
        let p = (point.x * point.x + point.z * point.z).sqrt();
        let e2 = self.eccentricity_squared;

        if p <= self.equatorial_radius * f64::EPSILON {
            let latitude = if point.y >= 0.0 { 90.0 } else { -90.0 };
            return Geodetic3d::new(latitude, 0.0, point.y.abs() - self.polar_radius);
        }

        let longitude = point.z.atan2(point.x);
        let mut lat = point.y.atan2(p * (1.0 - e2));
        let mut height = 0.0;

        for _ in 0..MAX_GEODETIC_ITERATIONS {
            let (sin_lat, cos_lat) = lat.sin_cos();
            let n = self.prime_vertical_radius(sin_lat);
            // Near the poles cos(lat) is tiny, so derive height from the
            // polar component instead.
            height = if cos_lat.abs() > sin_lat.abs() {
                p / cos_lat - n
            } else {
                point.y / sin_lat - n * (1.0 - e2)
            };
            let next = point.y.atan2(p * (1.0 - e2 * n / (n + height)));
            let delta = (next - lat).abs();
            lat = next;
            if delta < GEODETIC_TOLERANCE {
                break;
            }
        }

        let mut longitude = longitude.to_degrees();
        if longitude <= -180.0 {
            longitude = 180.0;
        }
        Geodetic3d::new(lat.to_degrees(), longitude, height)
    }

    /// Local north direction and surface normal at a geodetic coordinate.
    ///
    /// Returns `(north, normal)`, both unit length and mutually orthogonal.
    pub fn north_direction(&self, geo: Geodetic2d) -> (DVec3, DVec3) {
        let (sin_lat, cos_lat) = geo.latitude_radians().sin_cos();
        let (sin_lon, cos_lon) = geo.longitude_radians().sin_cos();
        let north = DVec3::new(-sin_lat * cos_lon, cos_lat, -sin_lat * sin_lon);
        (north, self.surface_normal(geo))
    }

    /// Rotation taking the canonical local axes onto the tangent frame at
    /// `geo`: `+Y` onto the surface normal, `+Z` onto north, `+X` onto east.
    pub fn local_rotation(&self, geo: Geodetic2d) -> DQuat {
        let (north, up) = self.north_direction(geo);
        let east = up.cross(north);
        DQuat::from_mat3(&DMat3::from_cols(east, up, north)).normalize()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}
