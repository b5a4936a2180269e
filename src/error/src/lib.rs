//! 游戏错误处理模块
//!
//! 动作执行时的前置条件错误，以及配置加载时可能出现的 IO / 解析错误。
//! 撞墙、越界、目标不存在之类的情况不是错误，动作会直接静默忽略。

use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 配置文件解析错误
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// 执行动作的实体缺少必要组件
    #[error("Entity {entity} has no {component} component")]
    MissingComponent {
        entity: u32,
        component: &'static str,
    },

    /// 只有带 Fighter 的实体才能发起近战
    #[error("Entity {0} is not an actor and cannot attack")]
    NotAnActor(u32),
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "配置文件不存在".to_string(),
            std::io::ErrorKind::PermissionDenied => "没有权限访问配置文件".to_string(),
            _ => format!("IO错误: {}", e),
        },
        GameError::ConfigError(e) => format!("配置文件格式错误: {}", e),
        GameError::NotAnActor(_) => "该实体无法发起攻击".to_string(),
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_has_friendly_message() {
        let err = GameError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(handle_error(&err), "配置文件不存在");
    }

    #[test]
    fn missing_component_falls_back_to_display() {
        let err = GameError::MissingComponent {
            entity: 7,
            component: "Position",
        };
        assert_eq!(handle_error(&err), "Entity 7 has no Position component");
    }

    #[test]
    fn bad_json_becomes_config_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err = GameError::from(parse);
        assert!(matches!(err, GameError::ConfigError(_)));
        assert!(handle_error(&err).starts_with("配置文件格式错误"));
    }
}
