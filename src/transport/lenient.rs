use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::Error as DeError;

/// Scalar that the gateways send either quoted or bare (`"200"` / `200`).
///
/// The text of the token is parsed with `T::from_str`, so `Lenient<String>` keeps the
/// number exactly as written (`0` becomes `"0"`) and `Lenient<i32>` accepts both forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lenient<T>(T);

impl<T> Lenient<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<'de, T> Deserialize<'de> for Lenient<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        let text: Cow<'_, str> = match token.as_bytes().first().copied() {
            Some(b'"') => Cow::Owned(serde_json::from_str::<String>(token).map_err(D::Error::custom)?),
            Some(b'-' | b'0'..=b'9') => Cow::Borrowed(token),
            _ => {
                return Err(D::Error::custom(
                    "expected field to be JSON string or number",
                ));
            }
        };

        text.trim().parse::<T>().map(Self).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Lenient;

    #[test]
    fn strings_keep_the_token_text() {
        let value: Lenient<String> = serde_json::from_str(r#""0""#).unwrap();
        assert_eq!(value.into_inner(), "0");

        let value: Lenient<String> = serde_json::from_str("1.50").unwrap();
        assert_eq!(value.into_inner(), "1.50");
    }

    #[test]
    fn integers_accept_quoted_and_bare_forms() {
        let value: Lenient<i32> = serde_json::from_str("200").unwrap();
        assert_eq!(value.into_inner(), 200);

        let value: Lenient<i32> = serde_json::from_str(r#""416""#).unwrap();
        assert_eq!(value.into_inner(), 416);
    }

    #[test]
    fn rejects_unparseable_or_non_scalar_values() {
        assert!(serde_json::from_str::<Lenient<i32>>(r#""abc""#).is_err());
        assert!(serde_json::from_str::<Lenient<i32>>("2.5").is_err());
        assert!(serde_json::from_str::<Lenient<String>>("true").is_err());
        assert!(serde_json::from_str::<Lenient<String>>("{}").is_err());
    }
}
