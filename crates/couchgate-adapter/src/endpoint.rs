use couchgate_core::{Endpoint, SourceOptions};

/// Derive the bulk key-lookup URI from a source's base URI.
///
/// Appends a path separator only when the base URI does not already end
/// with one.
fn rev_uri(base_uri: &str) -> String {
    let sep = if base_uri.ends_with('/') { "" } else { "/" };
    format!("{base_uri}{sep}_all_docs")
}

/// Add the `_all_docs` lookup URI to an endpoint prepared by the underlying
/// transport.
///
/// Without source options the endpoint is returned untouched. With source
/// options but no base URI, `rev_uri` is cleared — revision lookup is
/// disabled for that source.
pub fn prepare_endpoint(endpoint: Endpoint, source_options: Option<&SourceOptions>) -> Endpoint {
    let Some(source) = source_options else {
        return endpoint;
    };

    Endpoint {
        rev_uri: source.base_uri.as_deref().map(rev_uri),
        ..endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_rev_uri_from_base_uri() {
        let endpoint = Endpoint {
            uri: "/entry:ent1".into(),
            ..Default::default()
        };
        let source = SourceOptions {
            base_uri: Some("http://some.couchdb.com".into()),
        };

        let prepared = prepare_endpoint(endpoint, Some(&source));

        assert_eq!(
            prepared.rev_uri.as_deref(),
            Some("http://some.couchdb.com/_all_docs")
        );
        assert_eq!(prepared.uri, "/entry:ent1");
    }

    #[test]
    fn no_double_slash_on_trailing_separator() {
        let source = SourceOptions {
            base_uri: Some("http://some.couchdb.com/".into()),
        };

        let prepared = prepare_endpoint(Endpoint::default(), Some(&source));

        assert_eq!(
            prepared.rev_uri.as_deref(),
            Some("http://some.couchdb.com/_all_docs")
        );
    }

    #[test]
    fn clears_rev_uri_without_base_uri() {
        let endpoint = Endpoint {
            uri: "/entry:ent1".into(),
            rev_uri: Some("stale".into()),
            ..Default::default()
        };

        let prepared = prepare_endpoint(endpoint, Some(&SourceOptions::default()));

        assert!(prepared.rev_uri.is_none());
    }

    #[test]
    fn untouched_without_source_options() {
        let endpoint = Endpoint {
            uri: "/entry:ent1".into(),
            ..Default::default()
        };

        let prepared = prepare_endpoint(endpoint.clone(), None);

        assert_eq!(prepared, endpoint);
    }
}
