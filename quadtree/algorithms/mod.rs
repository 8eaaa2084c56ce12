// 四叉树算法模块
//
// 按功能分解为不同的子模块，均以 impl 块的形式扩展 Node 或 Quadtree：
// - insert: 插入，必要时分裂路径上已满的叶子
// - delete: 删除，清理空子节点并逐层合并
// - search: 点查找
// - split: 节点分裂与合并
// - debug: 遍历、调试输出和不变量检查

pub mod debug;
pub mod delete;
pub mod insert;
pub mod search;
pub mod split;
