// one binary for all api tests; linking is the slow part
mod contact;
mod form_client;
mod health_check;
mod helpers;
