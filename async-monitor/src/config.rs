use envconfig::Envconfig;

#[derive(Envconfig)]
pub struct MonitorConfig {
    #[envconfig(from = "BIND_HOST", default = "0.0.0.0")]
    pub host: String,

    #[envconfig(from = "BIND_PORT", default = "3301")]
    pub port: u16,
}

impl MonitorConfig {
    pub fn bind(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
