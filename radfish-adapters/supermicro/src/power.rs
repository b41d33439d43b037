//! 电源状态收敛
//!
//! 发出一次性电源命令后按固定间隔轮询电源状态，直到观察到期望状态
//! 或达到最大尝试次数。等待是尽力而为的：轮询超时不是错误，
//! 返回值始终是一次性命令本身的结果。

use std::time::Duration;

use radfish_core::{PowerState, PowerTransition, Result};
use tracing::{debug, info, warn};

use crate::client::{ClientError, ClientResult, SupermicroApi};
use crate::config::PowerWaitConfig;
use crate::error::classify;

/// 单次电源操作的收敛参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvergenceRequest {
    pub transition: PowerTransition,
    pub forceful: bool,
    pub wait: bool,
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl ConvergenceRequest {
    /// 按等待配置构造请求，重启和电源循环使用两倍尝试次数
    pub fn new(
        transition: PowerTransition,
        forceful: bool,
        wait: bool,
        config: &PowerWaitConfig,
    ) -> Self {
        let max_attempts = if transition.requires_down_edge() {
            config.max_attempts.saturating_mul(2)
        } else {
            config.max_attempts
        };

        Self {
            transition,
            forceful,
            wait,
            max_attempts,
            poll_interval: config.poll_interval(),
        }
    }
}

/// 收敛结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvergenceOutcome {
    /// 一次性命令的结果
    pub accepted: bool,
    /// 是否在尝试次数内观察到期望状态
    pub converged: bool,
    /// 实际读取电源状态的次数
    pub attempts: u32,
    /// 最后一次成功读取到的电源状态
    pub last_state: Option<PowerState>,
}

impl ConvergenceOutcome {
    fn immediate(accepted: bool) -> Self {
        Self {
            accepted,
            converged: false,
            attempts: 0,
            last_state: None,
        }
    }
}

/// 轮询过程观察者
pub trait PollObserver: Send + Sync {
    /// 成功读取到电源状态
    fn on_poll(&self, transition: PowerTransition, attempt: u32, state: PowerState);

    /// 读取电源状态失败，轮询会继续
    fn on_poll_error(&self, transition: PowerTransition, attempt: u32, error: &ClientError);
}

/// 默认观察者，写入 tracing 日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PollObserver for TracingObserver {
    fn on_poll(&self, transition: PowerTransition, attempt: u32, state: PowerState) {
        debug!("{} 第 {} 次轮询: 电源状态 = {}", transition, attempt, state);
    }

    fn on_poll_error(&self, transition: PowerTransition, attempt: u32, error: &ClientError) {
        warn!("{} 第 {} 次轮询读取电源状态失败: {}", transition, attempt, error);
    }
}

async fn issue<C>(client: &C, transition: PowerTransition, forceful: bool) -> ClientResult<bool>
where
    C: SupermicroApi + ?Sized,
{
    match transition {
        PowerTransition::On => client.power_on().await,
        PowerTransition::Off => client.power_off(forceful).await,
        PowerTransition::Restart => client.power_restart(forceful).await,
        PowerTransition::Cycle => client.power_cycle().await,
    }
}

/// 执行电源操作并按需等待状态收敛
///
/// 一次性命令失败时立即返回分类后的错误，不进行轮询
pub async fn converge<C>(
    client: &C,
    request: &ConvergenceRequest,
    observer: &dyn PollObserver,
) -> Result<ConvergenceOutcome>
where
    C: SupermicroApi + ?Sized,
{
    let transition = request.transition;
    info!(
        "执行电源操作: {} (强制: {}, 等待: {})",
        transition, request.forceful, request.wait
    );

    let accepted = issue(client, transition, request.forceful)
        .await
        .map_err(classify)?;

    if !request.wait || !accepted {
        debug!("{} 不等待状态收敛 (命令结果: {})", transition, accepted);
        return Ok(ConvergenceOutcome::immediate(accepted));
    }

    let target = transition.target_state();
    let mut went_down = false;
    let mut last_state = None;

    for attempt in 1..=request.max_attempts {
        tokio::time::sleep(request.poll_interval).await;

        let state = match client.power_status().await {
            Ok(raw) => PowerState::from_vendor(&raw),
            Err(e) => {
                observer.on_poll_error(transition, attempt, &e);
                continue;
            }
        };
        observer.on_poll(transition, attempt, state);
        last_state = Some(state);

        let converged = if transition.requires_down_edge() {
            if went_down && state == PowerState::On {
                true
            } else {
                if state == PowerState::Off {
                    went_down = true;
                }
                false
            }
        } else {
            state == target
        };

        if converged {
            info!("{} 完成: 第 {} 次轮询电源状态为 {}", transition, attempt, state);
            return Ok(ConvergenceOutcome {
                accepted,
                converged: true,
                attempts: attempt,
                last_state,
            });
        }
    }

    warn!(
        "{} 等待超时: {} 次轮询后未达到 {} (最后状态: {:?})",
        transition, request.max_attempts, target, last_state
    );
    Ok(ConvergenceOutcome {
        accepted,
        converged: false,
        attempts: request.max_attempts,
        last_state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_doubles_attempts_for_restart() {
        let config = PowerWaitConfig::default();

        let on = ConvergenceRequest::new(PowerTransition::On, false, true, &config);
        assert_eq!(on.max_attempts, 30);
        assert_eq!(on.poll_interval, Duration::from_secs(2));

        let off = ConvergenceRequest::new(PowerTransition::Off, true, true, &config);
        assert_eq!(off.max_attempts, 30);
        assert!(off.forceful);

        let restart = ConvergenceRequest::new(PowerTransition::Restart, false, true, &config);
        assert_eq!(restart.max_attempts, 60);

        let cycle = ConvergenceRequest::new(PowerTransition::Cycle, false, false, &config);
        assert_eq!(cycle.max_attempts, 60);
        assert!(!cycle.wait);
    }

    #[test]
    fn test_immediate_outcome() {
        let outcome = ConvergenceOutcome::immediate(false);
        assert!(!outcome.accepted);
        assert!(!outcome.converged);
        assert_eq!(outcome.attempts, 0);
        assert!(outcome.last_state.is_none());
    }
}
