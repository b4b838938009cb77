// ABOUTME: Integration tests for image references and digests.
// ABOUTME: Tests lenient parsing, Docker Hub defaults, and digest validation.

use imgstash::types::*;

mod image_ref_tests {
    use super::*;

    #[test]
    fn parse_simple_name() {
        let img = ImageRef::parse("nginx").unwrap();
        assert_eq!(img.registry(), "docker.io");
        assert_eq!(img.repository(), "library/nginx");
        assert_eq!(img.tag(), Some("latest"));
        assert!(img.digest().is_none());
    }

    #[test]
    fn parse_name_with_tag() {
        let img = ImageRef::parse("nginx:1.25").unwrap();
        assert_eq!(img.repository(), "library/nginx");
        assert_eq!(img.tag(), Some("1.25"));
    }

    #[test]
    fn parse_docker_hub_org() {
        let img = ImageRef::parse("bitnami/redis:7.2").unwrap();
        assert_eq!(img.registry(), "docker.io");
        assert_eq!(img.repository(), "bitnami/redis");
    }

    #[test]
    fn parse_with_registry() {
        let img = ImageRef::parse("registry.k8s.io/pause:3.9").unwrap();
        assert_eq!(img.registry(), "registry.k8s.io");
        assert_eq!(img.repository(), "pause");
        assert_eq!(img.tag(), Some("3.9"));
    }

    #[test]
    fn parse_registry_with_port() {
        let img = ImageRef::parse("localhost:5000/team/app").unwrap();
        assert_eq!(img.registry(), "localhost:5000");
        assert_eq!(img.repository(), "team/app");
        assert_eq!(img.tag(), Some("latest"));
    }

    #[test]
    fn parse_with_digest() {
        let digest = "sha256:abc123def456";
        let img = ImageRef::parse(&format!("nginx@{}", digest)).unwrap();
        assert_eq!(img.repository(), "library/nginx");
        assert_eq!(img.digest(), Some(digest));
        assert!(img.tag().is_none());
    }

    #[test]
    fn parse_full_reference() {
        let img = ImageRef::parse("ghcr.io/org/repo:v1@sha256:abc123").unwrap();
        assert_eq!(img.registry(), "ghcr.io");
        assert_eq!(img.repository(), "org/repo");
        assert_eq!(img.tag(), Some("v1"));
        assert_eq!(img.digest(), Some("sha256:abc123"));
    }

    #[test]
    fn tolerates_malformed_digest() {
        let img = ImageRef::parse("nginx@latest-ish").unwrap();
        assert_eq!(img.digest(), Some("latest-ish"));
    }

    #[test]
    fn tolerates_uppercase_and_surrounding_whitespace() {
        let img = ImageRef::parse("  ghcr.io/Org/App:V1 \n").unwrap();
        assert_eq!(img.repository(), "Org/App");
        assert_eq!(img.tag(), Some("V1"));
    }

    #[test]
    fn parse_empty_returns_error() {
        assert!(matches!(ImageRef::parse(""), Err(ParseImageRefError::Empty)));
        assert!(matches!(ImageRef::parse("   "), Err(ParseImageRefError::Empty)));
    }

    #[test]
    fn parse_invalid_chars_returns_error() {
        assert!(matches!(
            ImageRef::parse("invalid image!"),
            Err(ParseImageRefError::InvalidChar(' '))
        ));
    }

    #[test]
    fn parse_empty_parts_returns_error() {
        assert!(ImageRef::parse("nginx:").is_err());
        assert!(ImageRef::parse("nginx@").is_err());
        assert!(ImageRef::parse("ghcr.io/").is_err());
        assert!(ImageRef::parse("org//repo").is_err());
    }

    #[test]
    fn display_is_fully_qualified() {
        let img = ImageRef::parse("nginx").unwrap();
        assert_eq!(img.to_string(), "docker.io/library/nginx:latest");
        assert_eq!(img.name(), img.to_string());

        let img = ImageRef::parse("ghcr.io/org/repo:v1").unwrap();
        assert_eq!(img.to_string(), "ghcr.io/org/repo:v1");
    }

    #[test]
    fn from_str_matches_parse() {
        let img: ImageRef = "alpine:3.19".parse().unwrap();
        assert_eq!(img, ImageRef::parse("alpine:3.19").unwrap());
    }
}

mod digest_tests {
    use super::*;

    #[test]
    fn parse_sha256() {
        let digest = Digest::parse("sha256:DEADbeef").unwrap();
        assert_eq!(digest.algorithm(), "sha256");
        assert_eq!(digest.hex(), "deadbeef");
        assert_eq!(digest.to_string(), "sha256:deadbeef");
    }

    #[test]
    fn missing_algorithm_is_rejected() {
        assert_eq!(
            Digest::parse("deadbeef"),
            Err(ParseDigestError::MissingAlgorithm("deadbeef".to_string()))
        );
        assert!(matches!(
            Digest::parse(":deadbeef"),
            Err(ParseDigestError::MissingAlgorithm(_))
        ));
    }

    #[test]
    fn empty_and_non_hex_are_rejected() {
        assert_eq!(Digest::parse(""), Err(ParseDigestError::Empty));
        assert!(matches!(
            Digest::parse("sha256:"),
            Err(ParseDigestError::EmptyHex(_))
        ));
        assert_eq!(
            Digest::parse("sha256:xyz"),
            Err(ParseDigestError::InvalidHex('x'))
        );
    }
}
