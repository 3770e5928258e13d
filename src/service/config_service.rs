use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::Result;

// 配置服務，包裝實際的配置來源
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> Result<AppConfig> {
        let config = self.config_port.get_config()?;
        log::debug!("實際使用的配置：{:#?}", config);
        Ok(config)
    }
}
