pub mod session;

use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Check {
        token: SecretString,
        session_id: String,
    },
    Mount {
        token: SecretString,
        session_id: String,
    },
    Status {
        session_id: String,
    },
    Logout {
        session_id: String,
        redirect: bool,
    },
}
