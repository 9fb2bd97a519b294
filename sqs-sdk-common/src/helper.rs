use crate::Error;
use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use time::OffsetDateTime;
use time::macros::format_description;

/// 输出格式: YYYY-MM-DDThh:mm:ssZ，总是UTC，没有小数秒
///
/// eg: 2007-06-30T00:00:00Z
pub fn iso8601_seconds(date_time: &OffsetDateTime) -> Result<String, Error> {
    let utc = date_time.to_offset(time::UtcOffset::UTC);
    let s = utc.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
    ))?;
    Ok(s)
}

pub fn now_iso8601() -> Result<String, Error> {
    iso8601_seconds(&OffsetDateTime::now_utc())
}

pub fn sign_hmac_sha1(secret: &str, str_to_sign: &str) -> Result<Vec<u8>, Error> {
    type HmacSha1 = Hmac<Sha1>;
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|e| Error::Common(format!("invalid hmac key: {}", e)))?;
    mac.update(str_to_sign.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// HMAC-SHA1后再进行base64编码，结果中可能含有`+`、`/`、`=`
pub fn sign_hmac_sha1_base64(secret: &str, str_to_sign: &str) -> Result<String, Error> {
    let digest = sign_hmac_sha1(secret, str_to_sign)?;
    Ok(general_purpose::STANDARD.encode(digest))
}

pub fn parse_xml_str<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, Error> {
    quick_xml::de::from_str(text).map_err(|e| Error::Xml(e.to_string()))
}
