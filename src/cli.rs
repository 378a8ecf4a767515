use crate::config::{DEFAULT_CLIENT_SECRET_FILE, DEFAULT_SMS_STORE};
use crate::gmail_api::GMAIL_API_BASE;
use crate::platform::Platform;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Platform branch to run: `android` reads SMS, `ios` reads Gmail.
    /// Defaults to the platform the binary was built for.
    #[clap(long, value_enum)]
    pub platform: Option<Platform>,

    /// OAuth client id. Takes precedence over --client-secret-file.
    #[clap(long, env = "GOOGLE_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret to go with --client-id.
    #[clap(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Google client secret JSON downloaded from the cloud console.
    #[clap(long, default_value = DEFAULT_CLIENT_SECRET_FILE)]
    pub client_secret_file: PathBuf,

    /// JSON export of the device SMS store.
    #[clap(long, default_value = DEFAULT_SMS_STORE)]
    pub sms_store: PathBuf,

    #[clap(long, default_value = GMAIL_API_BASE, hide = true)]
    pub api_base_url: String,

    /// Write logs here. Without it logging stays off.
    #[clap(long)]
    pub log_file: Option<PathBuf>,
}
