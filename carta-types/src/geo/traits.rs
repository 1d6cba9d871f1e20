use num_traits::{Float, NumCast, One};

use super::datum::Datum;

/// Point on the Earth's surface given by latitude and longitude in degrees.
pub trait GeoPoint {
    /// Numeric type of the coordinates.
    type Num: Float;

    /// Latitude.
    fn lat(&self) -> Self::Num;
    /// Longitude.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }

    /// Great-circle distance in meters on a sphere with the datum's semimajor axis as radius.
    ///
    /// Returns `None` if the radius cannot be represented by the coordinate type.
    fn distance(&self, other: &impl GeoPoint<Num = Self::Num>, datum: &Datum) -> Option<Self::Num> {
        let radius = <Self::Num as NumCast>::from(datum.semimajor())?;
        let two = <Self::Num as NumCast>::from(2.0)?;

        let d_lat = other.lat_rad() - self.lat_rad();
        let d_lon = other.lon_rad() - self.lon_rad();
        let sin_lat = (d_lat / two).sin();
        let sin_lon = (d_lon / two).sin();

        let a = sin_lat * sin_lat + self.lat_rad().cos() * other.lat_rad().cos() * sin_lon * sin_lon;
        let c = two * a.sqrt().atan2((Self::Num::one() - a).sqrt());
        Some(radius * c)
    }
}

/// Geographic point that can be constructed from coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude.
    fn latlon(lat: N, lon: N) -> Self;

    /// Creates a point from longitude and latitude.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}
