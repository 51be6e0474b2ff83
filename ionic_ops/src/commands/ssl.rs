use clap::{self, Subcommand};

use crate::{
    absolute_path, join_path, parent_dir, system::FileMode, Context, Error, Paths, Process,
};

/// Manage TLS assets for local development.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a self-signed key and certificate for local HTTPS
    /// development.
    ///
    /// All cryptographic work is delegated to OpenSSL. Browsers will not
    /// trust the result until it is added to the local trust store.
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Where to write the private key. Defaults to `.ionic/ssl/key.pem` under
    /// the project root.
    #[clap(long, value_name = "FILE")]
    key_path: Option<String>,

    /// Where to write the certificate. Defaults to `.ionic/ssl/cert.pem`
    /// under the project root.
    #[clap(long, value_name = "FILE")]
    cert_path: Option<String>,

    /// RSA key size.
    #[clap(short = 'b', long, value_name = "BITS", default_value = "2048")]
    bits: String,

    /// Subject country name (C).
    #[clap(long, value_name = "NAME", default_value = "US")]
    country_name: String,

    /// Subject state or province name (ST).
    #[clap(long, value_name = "NAME", default_value = "Wisconsin")]
    state_or_province_name: String,

    /// Subject locality name (L).
    #[clap(long, value_name = "NAME", default_value = "Madison")]
    locality_name: String,

    /// Subject organization name (O).
    #[clap(long, value_name = "NAME", default_value = "Ionic")]
    organization_name: String,

    /// Subject common name (CN), also used as the DNS subject alternative
    /// name.
    #[clap(long, value_name = "NAME", default_value = "localhost")]
    common_name: String,

    /// The path where the OpenSSL request config is written for the duration
    /// of the run.
    #[clap(
        long,
        value_name = "FILE",
        default_value_t = join_path(&Paths::get().temp_dir, "ionic-ssl-req.cnf")
    )]
    config_path: String,
}

/// Subject fields and key size for the certificate request, as text.
///
/// OpenSSL is the authority on what the values may contain; nothing is
/// validated here.
#[derive(Debug)]
struct SubjectConfig {
    bits: String,
    country_name: String,
    state_or_province_name: String,
    locality_name: String,
    organization_name: String,
    common_name: String,
}

impl SubjectConfig {
    /// Renders the subject as an OpenSSL `-subj` argument.
    fn subject_line(&self) -> String {
        format!(
            "/C={}/ST={}/L={}/O={}/CN={}",
            self.country_name,
            self.state_or_province_name,
            self.locality_name,
            self.organization_name,
            self.common_name
        )
    }

    /// Renders the OpenSSL request config, including the `SAN` section that
    /// the `-reqexts SAN -extensions SAN` arguments name.
    fn req_config(&self) -> String {
        format!(
            "[req]
default_bits       = {bits}
distinguished_name = req_distinguished_name

[req_distinguished_name]
countryName                = {country_name}
stateOrProvinceName        = {state_or_province_name}
localityName               = {locality_name}
organizationName           = {organization_name}
commonName                 = {common_name}

[SAN]
subjectAltName=DNS:{common_name}
",
            bits = self.bits,
            country_name = self.country_name,
            state_or_province_name = self.state_or_province_name,
            locality_name = self.locality_name,
            organization_name = self.organization_name,
            common_name = self.common_name,
        )
    }
}

pub fn run(command: &Command, context: &Context) -> Result<(), Error> {
    match command {
        Command::Generate(args) => generate(args, context),
    }
}

fn generate(args: &GenerateArgs, context: &Context) -> Result<(), Error> {
    let project = context.paths.require_project()?;

    let key_path = match &args.key_path {
        Some(path) => absolute_path(path),
        None => join_path(&project.ssl_dir, "key.pem"),
    };
    let cert_path = match &args.cert_path {
        Some(path) => absolute_path(path),
        None => join_path(&project.ssl_dir, "cert.pem"),
    };

    let subject = SubjectConfig {
        bits: args.bits.clone(),
        country_name: args.country_name.clone(),
        state_or_province_name: args.state_or_province_name.clone(),
        locality_name: args.locality_name.clone(),
        organization_name: args.organization_name.clone(),
        common_name: args.common_name.clone(),
    };

    // The key is private to the developer, so the directories are owner-only.
    let key_dir = parent_dir(&key_path);
    let cert_dir = parent_dir(&cert_path);
    context.create_dir_all(key_dir, FileMode::RWX)?;
    if cert_dir != key_dir {
        context.create_dir_all(cert_dir, FileMode::RWX)?;
    }

    // Nothing may be written until both prompts pass: declining the second
    // prompt must leave the first file untouched. OpenSSL overwrites the
    // outputs in place, so there is no deletion step either.
    for path in [&key_path, &cert_path] {
        if context.file_exists(path)?
            && !context.confirm(&format!("File {path:?} exists. Overwrite?"))?
        {
            return Err(Error::new(format!("not overwriting {path:?}")));
        }
    }

    context.remove_file(&args.config_path)?;
    context.create_file(
        &args.config_path,
        subject.req_config().as_bytes(),
        FileMode::RW,
    )?;

    let newkey = format!("rsa:{}", subject.bits);
    let subj = subject.subject_line();
    let result = context.exec(Process::new(
        &context.paths.openssl,
        &[
            "req",
            "-x509",
            "-newkey",
            newkey.as_str(),
            "-nodes",
            "-subj",
            subj.as_str(),
            "-reqexts",
            "SAN",
            "-extensions",
            "SAN",
            "-config",
            args.config_path.as_str(),
            "-days",
            "365",
            "-keyout",
            key_path.as_str(),
            "-out",
            cert_path.as_str(),
        ],
    ));
    // The config is scratch; remove it whether or not OpenSSL succeeded.
    let cleanup = context.remove_file(&args.config_path);
    result?;
    cleanup?;

    println!();
    println!("Private key: {key_path:?}");
    println!("Certificate: {cert_path:?}");
    println!("Generated a self-signed certificate for local development.");
    Ok(())
}
