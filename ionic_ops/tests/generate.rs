//! End-to-end tests that run the real binary against a scratch Ionic project,
//! substituting a fake OpenSSL through `$OPENSSL`.

use std::fs;
use std::io::Write as _;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// The fake OpenSSL records its arguments and the request config under
/// `$FAKE_OPENSSL_DIR`, then writes placeholder key/cert files the way
/// `openssl req` would.
const FAKE_OPENSSL: &str = r#"#!/bin/sh
record="${FAKE_OPENSSL_DIR:?}"
printf '%s\n' "$@" > "$record/args"
keyout=
out=
config=
while [ $# -gt 0 ]; do
    case "$1" in
        -keyout) keyout="$2"; shift ;;
        -out) out="$2"; shift ;;
        -config) config="$2"; shift ;;
    esac
    shift
done
cp "$config" "$record/captured.cnf"
echo "fake private key" > "$keyout"
echo "fake certificate" > "$out"
"#;

/// A scratch Ionic project with a fake OpenSSL next to it.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ionic.config.json"),
            "{\"name\": \"photo-gallery\"}\n",
        )
        .unwrap();

        let openssl = dir.path().join("fake-openssl");
        fs::write(&openssl, FAKE_OPENSSL).unwrap();
        fs::set_permissions(&openssl, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Runs `ionic_ops` against this sandbox, piping `stdin` to any overwrite
    /// prompts.
    fn run(&self, args: &[&str], stdin: &str) -> Output {
        let bin = env!("CARGO_BIN_EXE_ionic_ops");
        let mut child = Command::new(bin)
            .args(args)
            .env("IONIC_PROJECT_DIR", self.dir.path())
            .env("OPENSSL", self.path("fake-openssl"))
            .env("FAKE_OPENSSL_DIR", self.dir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .unwrap();

        child.wait_with_output().unwrap()
    }

    /// Runs `ssl generate`, with the scratch config pinned inside the sandbox
    /// so concurrent tests don't share it.
    fn generate(&self, extra_args: &[&str], stdin: &str) -> Output {
        let config = self.path("scratch.cnf");
        let config = config.to_str().unwrap();
        let mut args = vec!["ssl", "generate", "--config-path", config];
        args.extend_from_slice(extra_args);
        self.run(&args, stdin)
    }
}

#[test]
fn test_generate_writes_key_and_cert() {
    let sandbox = Sandbox::new();
    let output = sandbox.generate(&[], "");
    assert!(output.status.success(), "{output:?}");

    assert_eq!(
        fs::read_to_string(sandbox.path(".ionic/ssl/key.pem")).unwrap(),
        "fake private key\n"
    );
    assert_eq!(
        fs::read_to_string(sandbox.path(".ionic/ssl/cert.pem")).unwrap(),
        "fake certificate\n"
    );

    // Destination directories are owner-only.
    let mode = fs::metadata(sandbox.path(".ionic/ssl"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o700);

    // The request config reached OpenSSL verbatim and was cleaned up after.
    assert_eq!(
        fs::read_to_string(sandbox.path("captured.cnf")).unwrap(),
        "[req]
default_bits       = 2048
distinguished_name = req_distinguished_name

[req_distinguished_name]
countryName                = US
stateOrProvinceName        = Wisconsin
localityName               = Madison
organizationName           = Ionic
commonName                 = localhost

[SAN]
subjectAltName=DNS:localhost
"
    );
    assert!(!sandbox.path("scratch.cnf").exists());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("Generated a self-signed certificate"),
        "{stdout}"
    );
}

#[test]
fn test_generate_argument_list() {
    let sandbox = Sandbox::new();
    let output = sandbox.generate(&["--bits", "4096", "--common-name", "gallery.local"], "");
    assert!(output.status.success(), "{output:?}");

    let args = fs::read_to_string(sandbox.path("args")).unwrap();
    let expected = format!(
        "req\n-x509\n-newkey\nrsa:4096\n-nodes\n\
         -subj\n/C=US/ST=Wisconsin/L=Madison/O=Ionic/CN=gallery.local\n\
         -reqexts\nSAN\n-extensions\nSAN\n\
         -config\n{config}\n-days\n365\n-keyout\n{key}\n-out\n{cert}\n",
        config = sandbox.path("scratch.cnf").display(),
        key = sandbox.path(".ionic/ssl/key.pem").display(),
        cert = sandbox.path(".ionic/ssl/cert.pem").display(),
    );
    assert_eq!(args, expected);
}

#[test]
fn test_generate_requires_a_project() {
    let dir = tempfile::tempdir().unwrap();
    let bin = env!("CARGO_BIN_EXE_ionic_ops");
    let output = Command::new(bin)
        .args(["ssl", "generate"])
        .current_dir(dir.path())
        .env_remove("IONIC_PROJECT_DIR")
        .env("OPENSSL", "/nonexistent/openssl")
        .output()
        .unwrap();

    assert!(!output.status.success(), "{output:?}");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not inside an Ionic project"), "{stderr}");

    // Nothing was created before the failure.
    assert!(!dir.path().join(".ionic").exists());
}

#[test]
fn test_declining_overwrite_keeps_existing_files() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.path(".ionic/ssl")).unwrap();
    fs::write(sandbox.path(".ionic/ssl/key.pem"), "old key\n").unwrap();

    let output = sandbox.generate(&[], "n\n");
    assert!(!output.status.success(), "{output:?}");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not overwriting"), "{stderr}");

    assert_eq!(
        fs::read_to_string(sandbox.path(".ionic/ssl/key.pem")).unwrap(),
        "old key\n"
    );
    assert!(!sandbox.path(".ionic/ssl/cert.pem").exists());

    // OpenSSL never ran and no scratch config was written.
    assert!(!sandbox.path("args").exists());
    assert!(!sandbox.path("scratch.cnf").exists());
}

#[test]
fn test_declining_second_prompt_deletes_nothing() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.path(".ionic/ssl")).unwrap();
    fs::write(sandbox.path(".ionic/ssl/key.pem"), "old key\n").unwrap();
    fs::write(sandbox.path(".ionic/ssl/cert.pem"), "old cert\n").unwrap();

    let output = sandbox.generate(&[], "y\nn\n");
    assert!(!output.status.success(), "{output:?}");

    assert_eq!(
        fs::read_to_string(sandbox.path(".ionic/ssl/key.pem")).unwrap(),
        "old key\n"
    );
    assert_eq!(
        fs::read_to_string(sandbox.path(".ionic/ssl/cert.pem")).unwrap(),
        "old cert\n"
    );
    assert!(!sandbox.path("args").exists());
}

#[test]
fn test_accepting_both_prompts_overwrites() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.path(".ionic/ssl")).unwrap();
    fs::write(sandbox.path(".ionic/ssl/key.pem"), "old key\n").unwrap();
    fs::write(sandbox.path(".ionic/ssl/cert.pem"), "old cert\n").unwrap();

    let output = sandbox.generate(&[], "y\ny\n");
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Overwrite? [y/N]"), "{stdout}");

    assert_eq!(
        fs::read_to_string(sandbox.path(".ionic/ssl/key.pem")).unwrap(),
        "fake private key\n"
    );
    assert_eq!(
        fs::read_to_string(sandbox.path(".ionic/ssl/cert.pem")).unwrap(),
        "fake certificate\n"
    );
}
