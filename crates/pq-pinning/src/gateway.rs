use pq_domain::ContentId;

/// Default fallback gateways, tried after the configured one in order.
pub const PUBLIC_GATEWAYS: [&str; 4] = [
    "https://ipfs.io",
    "https://gateway.pinata.cloud",
    "https://cloudflare-ipfs.com",
    "https://dweb.link",
];

const DEFAULT_GATEWAY: &str = "https://ipfs.io";

fn with_scheme(gateway: &str) -> String {
    let gateway = gateway.trim().trim_end_matches('/');
    if gateway.starts_with("http://") || gateway.starts_with("https://") {
        gateway.to_string()
    } else {
        format!("https://{gateway}")
    }
}

fn gateway_url(gateway: &str, cid: &ContentId) -> String {
    format!("{}/ipfs/{}", with_scheme(gateway), cid.as_str())
}

/// Single retrieval URL: `preferred`, else the configured gateway, else ipfs.io.
pub fn ipfs_url(cid: &ContentId, preferred: Option<&str>, configured: Option<&str>) -> String {
    let gateway = preferred.or(configured).unwrap_or(DEFAULT_GATEWAY);
    gateway_url(gateway, cid)
}

/// Every retrieval URL to try: the configured gateway, then `fallbacks`.
pub fn gateway_urls<S: AsRef<str>>(
    cid: &ContentId,
    configured: Option<&str>,
    fallbacks: &[S],
) -> Vec<String> {
    configured
        .into_iter()
        .chain(fallbacks.iter().map(AsRef::as_ref))
        .map(|gateway| gateway_url(gateway, cid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid() -> ContentId {
        ContentId::parse("ipfs://bafyphoto").unwrap()
    }

    #[test]
    fn preferred_gateway_gets_https_when_scheme_missing() {
        assert_eq!(
            ipfs_url(&cid(), Some("example.mypinata.cloud"), Some("https://other")),
            "https://example.mypinata.cloud/ipfs/bafyphoto"
        );
    }

    #[test]
    fn falls_back_to_ipfs_io() {
        assert_eq!(ipfs_url(&cid(), None, None), "https://ipfs.io/ipfs/bafyphoto");
        assert_eq!(
            ipfs_url(&cid(), None, Some("http://localhost:8080/")),
            "http://localhost:8080/ipfs/bafyphoto"
        );
    }

    #[test]
    fn lists_configured_gateway_then_public_ones() {
        let urls = gateway_urls(&cid(), Some("example.mypinata.cloud"), &PUBLIC_GATEWAYS);
        assert_eq!(
            urls,
            vec![
                "https://example.mypinata.cloud/ipfs/bafyphoto",
                "https://ipfs.io/ipfs/bafyphoto",
                "https://gateway.pinata.cloud/ipfs/bafyphoto",
                "https://cloudflare-ipfs.com/ipfs/bafyphoto",
                "https://dweb.link/ipfs/bafyphoto",
            ]
        );
        assert_eq!(gateway_urls(&cid(), None, &PUBLIC_GATEWAYS).len(), 4);
        assert!(gateway_urls::<&str>(&cid(), None, &[]).is_empty());
    }
}
