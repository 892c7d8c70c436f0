//! 站点接口层
//!
//! 只负责与外部站点的 HTTP 交互和页面解析，不出现业务判断

pub mod kakuyomu;
