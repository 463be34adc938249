//! Instance metadata document served at `/v1.json`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::region::region_code_to_id;

/// Instance metadata returned by the metadata service.
///
/// Every field is optional on the wire. Missing keys and `null` values decode to
/// empty strings, and unknown keys are ignored.
///
/// # Example
///
/// ```
/// use vultr_metadata::MetaData;
///
/// let body = r#"{"hostname": "vultr-guest", "region": {"regioncode": "EWR"}}"#;
/// let metadata: MetaData = serde_json::from_str(body).unwrap();
///
/// assert_eq!(metadata.hostname, "vultr-guest");
/// assert_eq!(metadata.region.id(), Some("1"));
/// assert!(metadata.instance_id.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaData {
    /// Hostname assigned to the instance.
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,

    /// Unique instance identifier.
    #[serde(rename = "instanceid", deserialize_with = "null_as_default")]
    pub instance_id: String,

    /// SSH public keys installed on the instance.
    #[serde(rename = "public-keys", deserialize_with = "null_as_default")]
    pub public_keys: String,

    /// Region the instance runs in.
    #[serde(deserialize_with = "null_as_default")]
    pub region: Region,

    /// BGP session parameters.
    #[serde(deserialize_with = "null_as_default")]
    pub bgp: Bgp,
}

/// Region section of the metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    /// Airport-style region code, e.g. `EWR`.
    #[serde(rename = "regioncode", deserialize_with = "null_as_default")]
    pub region_code: String,
}

impl Region {
    /// Numeric region identifier for this region code, if the code is known.
    pub fn id(&self) -> Option<&'static str> {
        region_code_to_id(&self.region_code)
    }
}

/// BGP section of the metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bgp {
    #[serde(deserialize_with = "null_as_default")]
    pub ipv4: BgpPeering,
    #[serde(deserialize_with = "null_as_default")]
    pub ipv6: BgpPeering,
}

/// One address family of a BGP session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BgpPeering {
    /// Address of the instance side of the session.
    #[serde(rename = "my-address", deserialize_with = "null_as_default")]
    pub my_address: String,

    /// ASN of the instance side of the session.
    #[serde(rename = "my-asn", deserialize_with = "null_as_default")]
    pub my_asn: String,

    /// Address of the provider's router.
    #[serde(rename = "peer-address", deserialize_with = "null_as_default")]
    pub peer_address: String,

    /// ASN of the provider's router.
    #[serde(rename = "peer-asn", deserialize_with = "null_as_default")]
    pub peer_asn: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
