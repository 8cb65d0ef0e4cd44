// ==========================================
// 出货格口产线分配 - 配置管理器
// ==========================================
// 职责: 配置加载（JSON 文件）、按键覆写、规则表校验
// 优先级: 命令行覆写 > 配置文件 > 内置默认
// ==========================================

use crate::config::app_config::AppConfig;
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{ContainsPolarity, MatchMode};
use std::fs;
use std::path::Path;

/// 配置键
pub mod config_keys {
    pub const PRIORITY_VALUE: &str = "filter.priorityValue";
    pub const PRIORITY_FIELD: &str = "filter.priorityField";
    pub const MATCH_MODE: &str = "filter.matchMode";
    pub const SUBSTRING: &str = "filter.substring";
    pub const CONTAINS_POLARITY: &str = "filter.containsPolarity";
    pub const REQUIRED_CARTON_STATUS: &str = "filter.requiredCartonStatus";
    pub const CARTON_STATUS_FIELD: &str = "filter.fields.cartonStatus";
    pub const REQ_SHIP_DATE_FIELD: &str = "filter.fields.reqShipDate";
    pub const CHUTE_FIELD: &str = "filter.fields.chute";

    /// 全部可覆写的键
    pub const ALL: [&str; 9] = [
        PRIORITY_VALUE,
        PRIORITY_FIELD,
        MATCH_MODE,
        SUBSTRING,
        CONTAINS_POLARITY,
        REQUIRED_CARTON_STATUS,
        CARTON_STATUS_FIELD,
        REQ_SHIP_DATE_FIELD,
        CHUTE_FIELD,
    ];
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径（None 时使用内置默认）
    ///
    /// # 返回
    /// - Ok(AppConfig): 配置（产线规则表已校验）
    /// - Err: 文件读取/解析失败或规则表无效
    pub fn load(path: Option<&Path>) -> ConfigResult<AppConfig> {
        let config = match path {
            None => AppConfig::default(),
            Some(p) => {
                let raw = fs::read_to_string(p).map_err(|e| ConfigError::FileReadError {
                    path: p.display().to_string(),
                    message: e.to_string(),
                })?;
                tracing::info!("加载配置文件: {}", p.display());
                Self::from_json_str(&raw)?
            }
        };

        // 规则表在加载时校验
        config.line_rule_table()?;
        Ok(config)
    }

    /// 从 JSON 字符串解析配置（不校验规则表）
    pub fn from_json_str(raw: &str) -> ConfigResult<AppConfig> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 按键覆写单个配置值
    ///
    /// # 参数
    /// - key: 见 [`config_keys`]
    /// - value: 新值（枚举值大小写不敏感）
    pub fn apply_override(config: &mut AppConfig, key: &str, value: &str) -> ConfigResult<()> {
        let filter = &mut config.filter;
        match key {
            config_keys::PRIORITY_VALUE => filter.priority_value = value.to_string(),
            config_keys::PRIORITY_FIELD => filter.priority_field = value.to_string(),
            config_keys::SUBSTRING => filter.substring = value.to_string(),
            config_keys::REQUIRED_CARTON_STATUS => {
                filter.required_carton_status = value.to_string()
            }
            config_keys::CARTON_STATUS_FIELD => filter.fields.carton_status = value.to_string(),
            config_keys::REQ_SHIP_DATE_FIELD => filter.fields.req_ship_date = value.to_string(),
            config_keys::CHUTE_FIELD => filter.fields.chute = value.to_string(),
            config_keys::MATCH_MODE => {
                filter.match_mode = value.parse::<MatchMode>().map_err(|message| {
                    ConfigError::ConfigValueError {
                        key: key.to_string(),
                        value: value.to_string(),
                        message,
                    }
                })?
            }
            config_keys::CONTAINS_POLARITY => {
                filter.contains_polarity = value.parse::<ContainsPolarity>().map_err(|message| {
                    ConfigError::ConfigValueError {
                        key: key.to_string(),
                        value: value.to_string(),
                        message,
                    }
                })?
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }

        tracing::debug!(key, value, "配置已覆写");
        Ok(())
    }

    /// 批量覆写
    pub fn apply_overrides<'a, I>(config: &mut AppConfig, overrides: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in overrides {
            Self::apply_override(config, key, value)?;
        }
        Ok(())
    }

    /// 配置快照（JSON 格式，用于日志/排障）
    pub fn snapshot(config: &AppConfig) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config =
            ConfigManager::from_json_str(r#"{"filter": {"priorityValue": "standard"}}"#).unwrap();
        assert_eq!(config.filter.priority_value, "standard");
        assert_eq!(config.filter.priority_field, "IS Rush?");
        assert_eq!(config.lines.rules.len(), 8);
    }

    #[test]
    fn test_apply_override_enums() {
        let mut config = AppConfig::default();
        ConfigManager::apply_override(&mut config, config_keys::MATCH_MODE, "Contains").unwrap();
        ConfigManager::apply_override(&mut config, config_keys::CONTAINS_POLARITY, "EXCLUDE")
            .unwrap();
        assert_eq!(config.filter.match_mode, MatchMode::Contains);
        assert_eq!(config.filter.contains_polarity, ContainsPolarity::Exclude);
    }

    #[test]
    fn test_apply_override_rejects_bad_values() {
        let mut config = AppConfig::default();
        assert!(matches!(
            ConfigManager::apply_override(&mut config, config_keys::MATCH_MODE, "regex"),
            Err(ConfigError::ConfigValueError { .. })
        ));
        assert!(matches!(
            ConfigManager::apply_override(&mut config, "filter.unknown", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_every_key_is_overridable() {
        let mut config = AppConfig::default();
        for key in config_keys::ALL {
            let value = match key {
                config_keys::MATCH_MODE => "equals",
                config_keys::CONTAINS_POLARITY => "include",
                _ => "x",
            };
            assert!(ConfigManager::apply_override(&mut config, key, value).is_ok());
        }
    }
}
