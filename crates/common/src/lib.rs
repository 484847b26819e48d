pub mod types;
pub mod env;

pub mod utils {
    pub mod logging;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_serializes_endpoint_listing() {
        let banner = types::ServiceBanner::ok(
            "Company registry API running",
            vec![types::EndpointInfo::new("/empresas", "GET")],
        );
        let v = serde_json::to_value(&banner).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["endpoints"][0]["path"], "/empresas");
        assert_eq!(v["endpoints"][0]["method"], "GET");
    }
}
