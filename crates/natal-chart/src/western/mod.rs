pub mod houses;
pub mod zodiac;

pub use houses::{house_of, houses_summary, interval_claims, HouseCusp, HouseCuspSet, HouseResolutionError, HOUSE_COUNT};
pub use zodiac::{degree_in_sign, normalize_degrees, sign_of, SignPosition, ZodiacSign, SIGN_ORDER};
