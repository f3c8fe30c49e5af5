//! 题目导航
//!
//! 在题目列表上维护一个带边界检查的光标。导航与作答状态无关，
//! 未作答的题可以离开，之后随时回来。

/// 导航控制器
#[derive(Debug, Clone)]
pub struct NavigationController {
    cursor: usize,
    total: usize,
}

impl NavigationController {
    /// 创建导航控制器
    ///
    /// `total` 由试卷题目数决定，加载后不变且保证大于 0
    pub fn new(total: usize) -> Self {
        Self { cursor: 0, total }
    }

    /// 当前光标位置
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 题目总数
    pub fn total(&self) -> usize {
        self.total
    }

    /// 跳转到指定题目，越界时不动
    ///
    /// # 返回
    /// 返回光标是否发生了移动
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.total && index != self.cursor {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// 下一题，已在最后一题时不动
    pub fn next(&mut self) -> bool {
        self.go_to(self.cursor + 1)
    }

    /// 上一题，已在第一题时不动
    pub fn previous(&mut self) -> bool {
        if self.cursor == 0 {
            false
        } else {
            self.go_to(self.cursor - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_to_bounds() {
        let mut nav = NavigationController::new(3);

        assert!(nav.go_to(2));
        assert_eq!(nav.cursor(), 2);

        // 越界是 no-op
        assert!(!nav.go_to(3));
        assert_eq!(nav.cursor(), 2);
        assert!(!nav.go_to(99));
        assert_eq!(nav.cursor(), 2);
    }

    #[test]
    fn test_next_previous_saturate() {
        let mut nav = NavigationController::new(2);

        assert!(!nav.previous());
        assert_eq!(nav.cursor(), 0);

        assert!(nav.next());
        assert_eq!(nav.cursor(), 1);

        assert!(!nav.next());
        assert_eq!(nav.cursor(), 1);

        assert!(nav.previous());
        assert_eq!(nav.cursor(), 0);
    }
}
