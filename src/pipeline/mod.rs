//! 动作分发流水线：分类 → 作曲 →（客户端播报）→ 执行 →（可选追问播报）
//!
//! 每个请求严格串行，阶段输出是下一阶段的硬依赖；各阶段失败即上抛，
//! 请求之间完全独立，无共享可变状态。

pub mod classifier;
pub mod composer;
pub mod executor;

pub use classifier::ActionClassifier;
pub use composer::ResponseComposer;
pub use executor::{ExecutionOutcome, PlanExecutor};
