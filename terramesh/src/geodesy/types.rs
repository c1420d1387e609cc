//! Geodetic coordinate value types.

use std::fmt;

/// Southern latitude limit in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// Northern latitude limit in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// A latitude/longitude pair in degrees.
///
/// Longitude is usually within (-180°, 180°] but values outside that range
/// are tolerated, since wraparound arithmetic near the date line produces
/// them. Use [`Geodetic2d::normalized`] to fold them back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geodetic2d {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Geodetic2d {
    /// Creates a coordinate from degrees.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a coordinate from radians.
    #[inline]
    pub fn from_radians(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude.to_degrees(), longitude.to_degrees())
    }

    #[inline]
    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }

    #[inline]
    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }

    /// Returns a copy with longitude folded into (-180°, 180°].
    pub fn normalized(&self) -> Self {
        let mut lon = (self.longitude + 180.0).rem_euclid(360.0) - 180.0;
        if lon == -180.0 {
            lon = 180.0;
        }
        Self::new(self.latitude.clamp(MIN_LATITUDE, MAX_LATITUDE), lon)
    }

    /// Attaches a height above the ellipsoid.
    #[inline]
    pub const fn with_height(self, height: f64) -> Geodetic3d {
        Geodetic3d {
            latitude: self.latitude,
            longitude: self.longitude,
            height,
        }
    }
}

impl fmt::Display for Geodetic2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}°, {:.6}°)", self.latitude, self.longitude)
    }
}

/// A latitude/longitude pair in degrees plus a height in metres above the
/// ellipsoid surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geodetic3d {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Height above the ellipsoid
    pub height: f64,
}

impl Geodetic3d {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64, height: f64) -> Self {
        Self {
            latitude,
            longitude,
            height,
        }
    }

    /// Drops the height component.
    #[inline]
    pub const fn to_2d(&self) -> Geodetic2d {
        Geodetic2d::new(self.latitude, self.longitude)
    }
}

impl From<Geodetic3d> for Geodetic2d {
    fn from(geo: Geodetic3d) -> Self {
        geo.to_2d()
    }
}

impl fmt::Display for Geodetic3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}°, {:.6}°, {:.2} m)",
            self.latitude, self.longitude, self.height
        )
    }
}
