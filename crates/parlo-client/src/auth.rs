//! Login and registration calls.
//!
//! These live on the gateway rather than in `parlo-auth` because they are
//! ordinary REST calls; the session store only ever sees their outcome.

use parlo_auth::AdminIdentity;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::gateway::AdminClient;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    admin: AdminIdentity,
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterOtpRequest<'a> {
    email: &'a str,
    password: &'a str,
    admin_secret_key: &'a str,
}

impl AdminClient {
    /// Exchange credentials for a bearer token and establish the session.
    ///
    /// Success persists the credential and records the admin identity;
    /// failure lands on the session store's login-scoped `error` flag.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure or if the
    /// credential could not be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminIdentity, ClientError> {
        self.session().begin_login();
        match self
            .post_json::<LoginResponse, _>("/admin/login", &LoginRequest { email, password })
            .await
        {
            Ok(response) => {
                self.session()
                    .complete_login(response.admin.clone(), response.token)?;
                Ok(response.admin)
            }
            Err(err) => {
                self.session().fail_login(err.flag_message("Login failed"));
                Err(err)
            }
        }
    }

    /// Request a registration OTP for a new admin account.
    ///
    /// Success raises the session store's `otp_sent` flag; the actual
    /// registration completes out of band.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn request_registration(
        &self,
        email: &str,
        password: &str,
        admin_secret_key: &str,
    ) -> Result<(), ClientError> {
        self.session().begin_login();
        match self
            .post_json::<serde_json::Value, _>(
                "/admin/register-request",
                &RegisterOtpRequest {
                    email,
                    password,
                    admin_secret_key,
                },
            )
            .await
        {
            Ok(_) => {
                self.session().mark_otp_sent();
                Ok(())
            }
            Err(err) => {
                self.session()
                    .fail_login(err.flag_message("OTP Request failed"));
                Err(err)
            }
        }
    }
}
