//! Clients for the two upstream services: ViaCEP (postal code → address) and
//! WeatherAPI.com (place → current conditions).

pub mod viacep;
pub mod weatherapi;

pub use viacep::ViaCepClient;
pub use weatherapi::WeatherApiClient;

fn trim_base_url(base_url: impl Into<String>) -> String {
    let mut base = base_url.into();
    while base.ends_with('/') {
        base.pop();
    }
    base
}
