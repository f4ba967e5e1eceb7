// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use metrics::gauge;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// 闸门已关闭
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("request gate is closed, service is shutting down")]
pub struct GateClosed;

/// 全局请求闸门
///
/// 保证整个进程内同一时刻最多只有一个抓取-清洗周期在执行。
/// 克隆得到的实例共享同一个许可。
#[derive(Clone, Debug)]
pub struct RequestGate {
    /// 单许可信号量
    semaphore: Arc<Semaphore>,
    /// 正在排队的请求数
    waiting: Arc<AtomicUsize>,
}

/// 闸门通行证
///
/// 持有期间独占闸门，drop 时释放。不借用闸门，可以移动到其他任务中。
#[derive(Debug)]
pub struct GatePass {
    _permit: OwnedSemaphorePermit,
    acquired_at: Instant,
}

impl GatePass {
    /// 持有闸门的时长
    pub fn held_for(&self) -> std::time::Duration {
        self.acquired_at.elapsed()
    }
}

impl Drop for GatePass {
    fn drop(&mut self) {
        debug!(held_ms = self.held_for().as_millis() as u64, "Request gate released");
    }
}

/// 排队计数，等待方被取消时同样会减回去
struct WaitingGuard {
    waiting: Arc<AtomicUsize>,
}

impl WaitingGuard {
    fn enter(waiting: &Arc<AtomicUsize>) -> Self {
        waiting.fetch_add(1, Ordering::SeqCst);
        gauge!("crawl_gate_waiting").increment(1.0);
        Self {
            waiting: waiting.clone(),
        }
    }
}

impl Drop for WaitingGuard {
    fn drop(&mut self) {
        self.waiting.fetch_sub(1, Ordering::SeqCst);
        gauge!("crawl_gate_waiting").decrement(1.0);
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestGate {
    /// 创建新的闸门
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            waiting: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 等待并获取闸门
    ///
    /// 没有超时：调用者会一直等到轮到自己为止。
    /// 等待期间被取消只会让出队列位置。
    ///
    /// # 返回值
    ///
    /// * `Ok(GatePass)` - 已获得独占执行权
    /// * `Err(GateClosed)` - 闸门已关闭
    pub async fn acquire(&self) -> Result<GatePass, GateClosed> {
        let waiting = WaitingGuard::enter(&self.waiting);
        let permit = self.semaphore.clone().acquire_owned().await;
        drop(waiting);

        let permit = permit.map_err(|_| GateClosed)?;
        debug!("Request gate acquired");
        Ok(GatePass {
            _permit: permit,
            acquired_at: Instant::now(),
        })
    }

    /// 当前是否有周期在执行
    pub fn is_busy(&self) -> bool {
        self.semaphore.available_permits() == 0
    }

    /// 排队等待闸门的请求数
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    /// 关闭闸门
    ///
    /// 正在执行的周期不受影响，之后所有等待和新的获取都会失败
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }
}
