//! Mutual TLS transport for the relying party API.
//!
//! The service presents certificates issued by its own CA, and identifies the relying
//! party by the client certificate it presents. Only the supplied CA is trusted;
//! system and bundled roots are disabled.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::{Certificate, ClientBuilder, Identity};
use secrecy::{ExposeSecret as _, SecretString};

use crate::Result;
use crate::error::Error;

/// PEM files making up the relying party's TLS material.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct CertificateFiles {
    pub ca: PathBuf,
    pub certificate: PathBuf,
    pub private_key: PathBuf,
}

impl CertificateFiles {
    pub fn new<P: Into<PathBuf>>(ca: P, certificate: P, private_key: P) -> Self {
        Self {
            ca: ca.into(),
            certificate: certificate.into(),
            private_key: private_key.into(),
        }
    }
}

/// Returns a [`ClientBuilder`] trusting only the CA in `files.ca` and presenting the
/// client certificate and key from `files`.
///
/// A certificate that does not match its key is rejected when the returned builder is
/// built; [`crate::Client::from_certificates`] reports it as [`crate::Kind::Certificate`].
pub fn builder(files: &CertificateFiles) -> Result<ClientBuilder> {
    let ca = read(&files.ca)?;
    let roots = Certificate::from_pem_bundle(&ca).map_err(|e| {
        Error::certificate(format!(
            "invalid CA certificate {}: {e}",
            files.ca.display()
        ))
    })?;
    if roots.is_empty() {
        return Err(Error::certificate(format!(
            "no certificates found in {}",
            files.ca.display()
        )));
    }

    let identity = identity(&files.certificate, &files.private_key)?;

    Ok(ClientBuilder::new()
        .tls_certs_only(roots)
        .identity(identity))
}

fn identity(certificate: &Path, private_key: &Path) -> Result<Identity> {
    let certificate_pem = read(certificate)?;
    let key_pem = read_secret(private_key)?;

    let mut pem = certificate_pem;
    if !pem.ends_with(b"\n") {
        pem.push(b'\n');
    }
    pem.extend_from_slice(key_pem.expose_secret().as_bytes());

    Identity::from_pem(&pem).map_err(|e| {
        Error::certificate(format!(
            "invalid client identity {} / {}: {e}",
            certificate.display(),
            private_key.display()
        ))
    })
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::file(path, e))
}

fn read_secret(path: &Path) -> Result<SecretString> {
    fs::read_to_string(path)
        .map(SecretString::from)
        .map_err(|e| Error::file(path, e))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::Kind;

    fn test_data(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data").join(name)
    }

    fn scratch_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create scratch file");
        file.write_all(contents.as_bytes()).expect("write scratch file");
        file
    }

    #[test]
    fn matching_identity_should_build_a_client() {
        let files = CertificateFiles::new(
            test_data("ca.pem"),
            test_data("client.pem"),
            test_data("client.key"),
        );

        let client = builder(&files).and_then(|b| {
            b.build()
                .map_err(|e| Error::with_source(Kind::Certificate, e))
        });

        assert!(client.is_ok(), "client builds: {:?}", client.err());
    }

    #[test]
    fn missing_file_should_be_a_file_error() {
        let files = CertificateFiles::new(
            "/nonexistent/ca.pem",
            "/nonexistent/cert.pem",
            "/nonexistent/key.pem",
        );

        let err = builder(&files).unwrap_err();

        assert_eq!(err.kind(), Kind::File);
        assert!(
            err.to_string().contains("/nonexistent/ca.pem"),
            "error names the unreadable file: {err}"
        );
    }

    #[test]
    fn ca_without_certificates_should_be_a_certificate_error() {
        let ca = scratch_file("not a certificate\n");
        let files = CertificateFiles::new(ca.path(), ca.path(), ca.path());

        let err = builder(&files).unwrap_err();

        assert_eq!(err.kind(), Kind::Certificate);
    }

    #[test]
    fn garbage_key_should_be_a_certificate_error() {
        let key = scratch_file("not a private key\n");
        let files = CertificateFiles::new(
            test_data("ca.pem").as_path(),
            test_data("client.pem").as_path(),
            key.path(),
        );

        let err = builder(&files).unwrap_err();

        assert_eq!(err.kind(), Kind::Certificate);
    }

    #[test]
    fn mismatched_key_should_be_a_certificate_error() {
        let files = CertificateFiles::new(
            test_data("ca.pem"),
            test_data("client.pem"),
            test_data("other.key"),
        );

        let err = crate::Client::from_certificates(crate::Config::test(), &files).unwrap_err();

        assert_eq!(err.kind(), Kind::Certificate);
    }
}
